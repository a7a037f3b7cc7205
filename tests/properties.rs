//! Property-based tests for the parser.
//!
//! These verify the structural invariants that must hold for ANY well-formed
//! token stream, not just the crafted examples: balanced start/end pairs,
//! zero rule depth at termination, compound arity, non-empty pseudo names
//! and interpolation handle order.

use proptest::prelude::*;

use istf_parser::location::Range;
use istf_parser::node::Node;
use istf_parser::token::{Handle, QuoteKind, Side, Token, TokenType};
use istf_parser::Parser;

// =============================================================================
// Generators
// =============================================================================

#[derive(Debug, Clone)]
enum SelectorPiece {
    Word(String),
    Interpolation,
    Pseudo(String),
}

#[derive(Debug, Clone)]
enum ValuePiece {
    Word(String),
    Interpolation,
    Quoted { text: String, interpolated: bool },
    Function { name: String, args: Vec<String> },
}

#[derive(Debug, Clone)]
enum PropertyPiece {
    Word(String),
    Interpolation,
}

#[derive(Debug, Clone)]
struct Declaration {
    property: PropertyPiece,
    // comma separated segments, each a list of value pieces
    segments: Vec<Vec<ValuePiece>>,
}

#[derive(Debug, Clone)]
struct Rule {
    selectors: Vec<SelectorPiece>,
    declarations: Vec<Declaration>,
    nested: Option<Box<Rule>>,
}

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}"
}

fn selector_piece() -> impl Strategy<Value = SelectorPiece> {
    prop_oneof![
        "\\.[a-z][a-z0-9]{0,4}".prop_map(SelectorPiece::Word),
        word().prop_map(SelectorPiece::Word),
        Just(SelectorPiece::Interpolation),
        word().prop_map(SelectorPiece::Pseudo),
    ]
}

fn value_piece() -> impl Strategy<Value = ValuePiece> {
    prop_oneof![
        3 => word().prop_map(ValuePiece::Word),
        1 => Just(ValuePiece::Interpolation),
        1 => (word(), any::<bool>())
            .prop_map(|(text, interpolated)| ValuePiece::Quoted { text, interpolated }),
        1 => (word(), prop::collection::vec(word(), 1..3))
            .prop_map(|(name, args)| ValuePiece::Function { name, args }),
    ]
}

fn declaration() -> impl Strategy<Value = Declaration> {
    (
        prop_oneof![
            3 => word().prop_map(PropertyPiece::Word),
            1 => Just(PropertyPiece::Interpolation),
        ],
        prop::collection::vec(prop::collection::vec(value_piece(), 1..3), 1..3),
    )
        .prop_map(|(property, segments)| Declaration { property, segments })
}

fn flat_rule() -> impl Strategy<Value = Rule> {
    (
        prop::collection::vec(selector_piece(), 1..4),
        prop::collection::vec(declaration(), 0..3),
    )
        .prop_map(|(selectors, declarations)| Rule {
            selectors,
            declarations,
            nested: None,
        })
}

fn rule() -> impl Strategy<Value = Rule> {
    (
        prop::collection::vec(selector_piece(), 1..4),
        prop::collection::vec(declaration(), 0..3),
        prop::option::of(flat_rule()),
    )
        .prop_map(|(selectors, declarations, nested)| Rule {
            selectors,
            declarations,
            nested: nested.map(Box::new),
        })
}

fn documents() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(rule(), 1..3)
}

// =============================================================================
// Token rendering
// =============================================================================

/// Renders a document to tokens the way the lexer would, tracking the
/// column cursor and assigning interpolation handles in source order.
struct Renderer {
    tokens: Vec<Token>,
    column: usize,
    next_handle: Handle,
}

impl Renderer {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            column: 1,
            next_handle: 0,
        }
    }

    fn push(&mut self, token_type: TokenType, width: usize) {
        let end = if width == 0 {
            self.column
        } else {
            self.column + width - 1
        };
        self.tokens
            .push(Token::new(token_type, Range::on_line(1, self.column, end)));
        if width > 0 {
            self.column = end + 1;
        }
    }

    fn space(&mut self) {
        self.column += 1;
    }

    fn word(&mut self, value: &str) {
        self.push(TokenType::Word(value.to_string()), value.len());
    }

    fn interpolation(&mut self) {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.push(TokenType::Interpolation(handle), 4);
    }

    fn punct(&mut self, token_type: TokenType) {
        self.push(token_type, 1);
    }

    fn selector_piece(&mut self, piece: &SelectorPiece) {
        match piece {
            SelectorPiece::Word(value) => self.word(value),
            SelectorPiece::Interpolation => self.interpolation(),
            SelectorPiece::Pseudo(name) => {
                self.punct(TokenType::Colon);
                self.word(name);
            }
        }
    }

    fn value_piece(&mut self, piece: &ValuePiece) {
        match piece {
            ValuePiece::Word(value) => self.word(value),
            ValuePiece::Interpolation => self.interpolation(),
            ValuePiece::Quoted { text, interpolated } => {
                self.punct(TokenType::Quote(QuoteKind::Double));
                self.push(TokenType::Str(text.clone()), text.len());
                if *interpolated {
                    self.interpolation();
                }
                self.punct(TokenType::Quote(QuoteKind::Double));
            }
            ValuePiece::Function { name, args } => {
                self.word(name);
                self.punct(TokenType::Paren(Side::Open));
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.punct(TokenType::Comma);
                        self.space();
                    }
                    self.word(arg);
                }
                self.punct(TokenType::Paren(Side::Close));
            }
        }
    }

    fn declaration(&mut self, declaration: &Declaration) {
        match &declaration.property {
            PropertyPiece::Word(value) => self.word(value),
            PropertyPiece::Interpolation => self.interpolation(),
        }
        self.punct(TokenType::Colon);
        self.space();
        for (i, segment) in declaration.segments.iter().enumerate() {
            if i > 0 {
                self.punct(TokenType::Comma);
                self.space();
            }
            for (j, piece) in segment.iter().enumerate() {
                if j > 0 {
                    self.space();
                }
                self.value_piece(piece);
            }
        }
        self.punct(TokenType::Semicolon);
        self.space();
    }

    fn rule(&mut self, rule: &Rule) {
        for (i, piece) in rule.selectors.iter().enumerate() {
            if i > 0 {
                self.space();
            }
            self.selector_piece(piece);
        }
        self.space();
        self.punct(TokenType::Brace(Side::Open));
        self.space();
        for declaration in &rule.declarations {
            self.declaration(declaration);
        }
        if let Some(nested) = &rule.nested {
            self.rule(nested);
        }
        self.punct(TokenType::Brace(Side::Close));
        self.space();
    }
}

fn render(document: &[Rule]) -> (Vec<Token>, Handle) {
    let mut renderer = Renderer::new();
    for rule in document {
        renderer.rule(rule);
    }
    (renderer.tokens, renderer.next_handle)
}

// =============================================================================
// Invariant checks
// =============================================================================

fn matching_end(start: &Node) -> &'static str {
    match start {
        Node::RuleStart(_) => "ruleEnd",
        Node::CompoundSelectorStart => "compoundSelectorEnd",
        Node::CompoundValueStart => "compoundValueEnd",
        Node::FunctionStart(_) => "functionEnd",
        Node::StringStart(_) => "stringEnd",
        _ => unreachable!("not a start node"),
    }
}

fn check_balance(nodes: &[Node]) {
    let mut stack = Vec::new();

    for node in nodes {
        if node.is_end() {
            let open = stack.pop().unwrap_or_else(|| {
                panic!("{} closes nothing", node.name());
            });
            assert_eq!(matching_end(open), node.name(), "mismatched pair");
        }
        if node.is_start() {
            stack.push(node);
        }
    }

    assert!(stack.is_empty(), "unclosed groups: {:?}", stack);
}

/// Walks one group and returns how many items it holds. Whole sub-groups
/// count as one item, combinators count as none. Compound groups must hold
/// at least two.
fn check_group(iter: &mut std::slice::Iter<'_, Node>) -> usize {
    let mut items = 0;

    while let Some(node) = iter.next() {
        if node.is_end() {
            break;
        }
        if node.is_start() {
            let inner = check_group(iter);
            if matches!(node, Node::CompoundSelectorStart | Node::CompoundValueStart) {
                assert!(inner >= 2, "compound group with {} item(s)", inner);
            }
            items += 1;
        } else if !node.is_combinator() {
            items += 1;
        }
    }

    items
}

fn check_compound_arity(nodes: &[Node]) {
    // the top level is not a group but walks the same way; every end token
    // is consumed by the recursion for its own start
    let _ = check_group(&mut nodes.iter());
}

fn check_pseudo_names(nodes: &[Node]) {
    let mut iter = nodes.iter().peekable();

    while let Some(node) = iter.next() {
        match node {
            Node::Selector(s) if s.starts_with(':') && s.len() == 1 => {
                assert!(
                    matches!(iter.peek(), Some(Node::SelectorRef(_))),
                    "bare ':' selector without a ref"
                );
            }
            Node::FunctionStart(s) if s.starts_with(':') => {
                assert!(s.len() > 1, "pseudo-class function with empty name");
            }
            _ => {}
        }
    }
}

fn emitted_handles(nodes: &[Node]) -> Vec<Handle> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::SelectorRef(h)
            | Node::PropertyRef(h)
            | Node::ValueRef(h)
            | Node::PartialRef(h) => Some(*h),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    #[test]
    fn parsed_streams_uphold_the_invariants(document in documents()) {
        let (tokens, handle_count) = render(&document);
        let nodes = Parser::parse(tokens).expect("generated stream should parse");

        check_balance(&nodes);
        check_compound_arity(&nodes);
        check_pseudo_names(&nodes);

        let handles = emitted_handles(&nodes);
        prop_assert_eq!(handles, (0..handle_count).collect::<Vec<_>>());
    }

    #[test]
    fn rule_depth_returns_to_zero(document in documents()) {
        let (tokens, _) = render(&document);
        let nodes = Parser::parse(tokens).expect("generated stream should parse");

        let mut depth = 0i64;
        for node in &nodes {
            match node {
                Node::RuleStart(_) => depth += 1,
                Node::RuleEnd => {
                    depth -= 1;
                    prop_assert!(depth >= 0);
                }
                _ => {}
            }
        }
        prop_assert_eq!(depth, 0);
    }
}
