use crate::ui;
use std::time::{Duration, Instant};

/// Step reporter for a single run; silent unless enabled
pub struct ProgressTracker {
    operation_name: String,
    start_time: Instant,
    steps: Vec<String>,
    current_step: usize,
    enabled: bool,
}

impl ProgressTracker {
    pub fn new(operation_name: &str, enabled: bool) -> Self {
        if enabled {
            ui::section_header(operation_name);
        }
        Self {
            operation_name: operation_name.to_string(),
            start_time: Instant::now(),
            steps: Vec::new(),
            current_step: 0,
            enabled,
        }
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    /// Start the next step
    pub fn start_step(&self) -> &str {
        match self.steps.get(self.current_step) {
            Some(step) => {
                if self.enabled {
                    ui::status_message(step);
                }
                step
            }
            None => "",
        }
    }

    pub fn complete_step(&mut self) {
        if let Some(step) = self.steps.get(self.current_step) {
            if self.enabled {
                ui::success_message(step);
            }
            self.current_step += 1;
        }
    }

    pub fn skip_step(&mut self, reason: &str) {
        if let Some(step) = self.steps.get(self.current_step) {
            if self.enabled {
                ui::warning_message(&format!("Skipped: {step} ({reason})"));
            }
            self.current_step += 1;
        }
    }

    /// Complete the operation
    pub fn complete(&self) {
        if self.enabled {
            ui::success_message(&format!(
                "{} completed in {}",
                self.operation_name,
                Self::format_duration(self.start_time.elapsed())
            ));
        }
    }

    fn format_duration(duration: Duration) -> String {
        let millis = duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else {
            format!("{:.1} seconds", duration.as_secs_f64())
        }
    }
}
