//! Cross-referencing of symbol mentions inside free-text notes.
//!
//! Notes such as `use #raptor_uri with raptor_new_uri() or RAPTOR_LOG_LEVEL_NONE`
//! are rewritten so every mention becomes a DocBook link. The rules run in a
//! fixed order and text produced by one rule is never seen by the next.

use regex::{Captures, Regex};

use crate::types::Result;
use crate::utils::{escape_xml, function_anchor, symbol_anchor};

/// Symbol prefixes of the Redland libraries, used when no others are configured
pub const DEFAULT_SYMBOL_PREFIXES: [&str; 3] = ["raptor", "librdf", "rasqal"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Type,
    Enum,
    Function,
}

pub fn function_link(name: &str) -> String {
    let name = escape_xml(name);
    format!(
        r#"<link linkend="{}"><function>{name}</function></link>"#,
        function_anchor(&name)
    )
}

pub fn type_link(name: &str) -> String {
    let name = escape_xml(name);
    format!(
        r#"<link linkend="{}"><type>{name}</type></link>"#,
        symbol_anchor(&name)
    )
}

pub fn enum_link(name: &str) -> String {
    let name = escape_xml(name);
    format!(
        r#"<link linkend="{}"><literal>{name}</literal></link>"#,
        symbol_anchor(&name)
    )
}

impl SymbolKind {
    pub fn link(self, name: &str) -> String {
        match self {
            Self::Type => type_link(name),
            Self::Enum => enum_link(name),
            Self::Function => function_link(name),
        }
    }
}

/// One pattern and the kind of symbol its first capture group names
#[derive(Debug, Clone)]
pub struct LinkRule {
    kind: SymbolKind,
    pattern: Regex,
}

impl LinkRule {
    pub fn new(kind: SymbolKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            kind,
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Split `text` into plain runs and rendered links.
    ///
    /// Whatever the match holds before the symbol (a `#`) is dropped; whatever
    /// follows it (the `(` of a call) is kept after the link.
    fn split(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            let (whole, symbol) = match Self::symbol_match(&caps) {
                Some(found) => found,
                None => continue,
            };
            if whole.start() > last {
                segments.push(Segment::Text(text[last..whole.start()].to_string()));
            }
            let mut markup = self.kind.link(symbol.as_str());
            markup.push_str(&text[symbol.end()..whole.end()]);
            segments.push(Segment::Markup(markup));
            last = whole.end();
        }

        if last < text.len() {
            segments.push(Segment::Text(text[last..].to_string()));
        }
        segments
    }

    fn symbol_match<'t>(caps: &Captures<'t>) -> Option<(regex::Match<'t>, regex::Match<'t>)> {
        Some((caps.get(0)?, caps.get(1)?))
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Markup(String),
}

/// Ordered rule list: types, then enum constants, then function calls.
#[derive(Debug, Clone)]
pub struct NotationLinker {
    rules: Vec<LinkRule>,
}

impl NotationLinker {
    /// Build the rule list for the given symbol prefixes.
    ///
    /// With prefixes, types and functions must start with a lowercase prefix
    /// and enum constants with its uppercase form followed by `_`. With no
    /// prefixes any identifier of the right shape is linked.
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self> {
        let rules = if prefixes.is_empty() {
            vec![
                LinkRule::new(SymbolKind::Type, r"#([a-z][a-z0-9_]*)")?,
                LinkRule::new(SymbolKind::Enum, r"#?\b([A-Z][A-Z0-9]*(?:_[A-Z0-9]+)+)\b")?,
                LinkRule::new(SymbolKind::Function, r"\b([a-z][a-z0-9_]*)\(")?,
            ]
        } else {
            let lower = Self::alternation(prefixes, str::to_lowercase);
            let upper = Self::alternation(prefixes, str::to_uppercase);
            vec![
                LinkRule::new(SymbolKind::Type, &format!(r"#((?:{lower})\w+)"))?,
                LinkRule::new(SymbolKind::Enum, &format!(r"#?\b((?:{upper})_\w+)"))?,
                LinkRule::new(SymbolKind::Function, &format!(r"\b((?:{lower})_\w+)\("))?,
            ]
        };

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[LinkRule] {
        &self.rules
    }

    /// Rewrite symbol mentions in already-escaped text into links
    pub fn link(&self, text: &str) -> String {
        let mut segments = vec![Segment::Text(text.to_string())];

        for rule in &self.rules {
            segments = segments
                .into_iter()
                .flat_map(|segment| match segment {
                    Segment::Text(text) => rule.split(&text),
                    markup => vec![markup],
                })
                .collect();
        }

        segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(s) | Segment::Markup(s) => s,
            })
            .collect()
    }

    fn alternation<S: AsRef<str>>(prefixes: &[S], case: fn(&str) -> String) -> String {
        prefixes
            .iter()
            .map(|p| regex::escape(&case(p.as_ref())))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl Default for NotationLinker {
    fn default() -> Self {
        Self::new(&DEFAULT_SYMBOL_PREFIXES).expect("default link patterns are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str) -> String {
        NotationLinker::default().link(text)
    }

    #[test]
    fn test_rule_precedence_is_type_enum_function() {
        let kinds: Vec<SymbolKind> = NotationLinker::default()
            .rules()
            .iter()
            .map(LinkRule::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![SymbolKind::Type, SymbolKind::Enum, SymbolKind::Function]
        );
    }

    #[test]
    fn test_type_reference_drops_hash() {
        assert_eq!(
            link("takes a #raptor_uri now"),
            r#"takes a <link linkend="raptor-uri"><type>raptor_uri</type></link> now"#
        );
    }

    #[test]
    fn test_enum_reference_with_and_without_hash() {
        let expected = r#"<link linkend="RAPTOR-LOG-LEVEL-NONE:CAPS"><literal>RAPTOR_LOG_LEVEL_NONE</literal></link>"#;
        assert_eq!(link("#RAPTOR_LOG_LEVEL_NONE"), expected);
        assert_eq!(link("RAPTOR_LOG_LEVEL_NONE"), expected);
    }

    #[test]
    fn test_function_call_keeps_paren() {
        assert_eq!(
            link("use raptor_new_uri_from_counted_string() instead"),
            r#"use <link linkend="raptor-new-uri-from-counted-string"><function>raptor_new_uri_from_counted_string</function></link>() instead"#
        );
    }

    #[test]
    fn test_enum_followed_by_paren_is_not_a_function() {
        let out = link("RAPTOR_ASSERT(x)");
        assert!(out.starts_with(r#"<link linkend="RAPTOR-ASSERT:CAPS"><literal>RAPTOR_ASSERT</literal></link>"#));
        assert!(!out.contains("<function>"));
        assert!(out.ends_with("(x)"));
    }

    #[test]
    fn test_hashed_type_followed_by_paren_stays_a_type() {
        let out = link("#raptor_world(");
        assert_eq!(
            out,
            r#"<link linkend="raptor-world"><type>raptor_world</type></link>("#
        );
    }

    #[test]
    fn test_mixed_references() {
        let out = link("#librdf_node and LIBRDF_NODE_TYPE_BLANK via librdf_new_node(world)");
        assert!(out.contains(r#"<type>librdf_node</type>"#));
        assert!(out.contains(r#"<literal>LIBRDF_NODE_TYPE_BLANK</literal>"#));
        assert!(out.contains(r#"<function>librdf_new_node</function></link>(world)"#));
    }

    #[test]
    fn test_unrelated_text_untouched() {
        assert_eq!(link("no symbols (here) #123"), "no symbols (here) #123");
        assert_eq!(link("xraptor_foo("), "xraptor_foo(");
    }

    #[test]
    fn test_custom_prefixes() {
        let linker = NotationLinker::new(&["mylib"]).unwrap();
        let out = linker.link("see #mylib_ctx, MYLIB_OK and mylib_open() not raptor_new_uri()");
        assert!(out.contains("<type>mylib_ctx</type>"));
        assert!(out.contains("<literal>MYLIB_OK</literal>"));
        assert!(out.contains("<function>mylib_open</function>"));
        assert!(out.ends_with("not raptor_new_uri()"));
    }

    #[test]
    fn test_generic_patterns_without_prefixes() {
        let linker = NotationLinker::new::<&str>(&[]).unwrap();
        let out = linker.link("#widget uses WIDGET_MODE_FAST and widget_open()");
        assert!(out.contains("<type>widget</type>"));
        assert!(out.contains("<literal>WIDGET_MODE_FAST</literal>"));
        assert!(out.contains("<function>widget_open</function></link>()"));
    }

    #[test]
    fn test_linking_is_deterministic() {
        let text = "#raptor_uri RAPTOR_X raptor_f()";
        assert_eq!(link(text), link(text));
    }

    #[test]
    fn test_entity_links_escape_names() {
        assert_eq!(
            function_link("raptor_new_uri"),
            r#"<link linkend="raptor-new-uri"><function>raptor_new_uri</function></link>"#
        );
        assert_eq!(
            type_link("RAPTOR_URI"),
            r#"<link linkend="RAPTOR-URI:CAPS"><type>RAPTOR_URI</type></link>"#
        );
        assert_eq!(
            enum_link("a<b"),
            r#"<link linkend="a&lt;b"><literal>a&lt;b</literal></link>"#
        );
    }
}
