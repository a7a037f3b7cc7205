use crate::token::Handle;
use core::fmt::{Display, Formatter};

/// The rule kinds ISTF distinguishes.
///
/// The numeric value of each kind is part of the wire format downstream
/// encoders emit and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RuleKind {
    Style = 1,
    Charset = 2,
    Import = 3,
    Media = 4,
    FontFace = 5,
    Page = 6,
    Keyframes = 7,
    Keyframe = 8,
    Margin = 9,
    Namespace = 10,
    CounterStyle = 11,
    Supports = 12,
    Document = 13,
    FontFeatureValues = 14,
    Viewport = 15,
    RegionStyle = 16,
}

impl RuleKind {
    /// Stable small-integer id used by downstream wire encoders.
    pub fn discriminant(self) -> u8 {
        self as u8
    }

    /// Stable label for this kind.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Style => "style",
            RuleKind::Charset => "charset",
            RuleKind::Import => "import",
            RuleKind::Media => "media",
            RuleKind::FontFace => "fontFace",
            RuleKind::Page => "page",
            RuleKind::Keyframes => "keyframes",
            RuleKind::Keyframe => "keyframe",
            RuleKind::Margin => "margin",
            RuleKind::Namespace => "namespace",
            RuleKind::CounterStyle => "counterStyle",
            RuleKind::Supports => "supports",
            RuleKind::Document => "document",
            RuleKind::FontFeatureValues => "fontFeatureValues",
            RuleKind::Viewport => "viewport",
            RuleKind::RegionStyle => "regionStyle",
        }
    }
}

/// A single item of the flat ISTF node stream.
///
/// Structure is carried by start/end pairs (rules, compound selectors,
/// compound values, functions, strings); everything else is a leaf. The
/// stream is self-delimiting: a consumer never needs lookahead or
/// backtracking to know where a group ends.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    RuleStart(RuleKind),
    RuleEnd,
    /// Name of a named at-rule (`@keyframes <name>`). Reserved for the
    /// at-rule grammar.
    RuleName(String),

    Selector(String),
    /// `&`
    ParentSelector,
    /// `*`
    UniversalSelector,
    CompoundSelectorStart,
    CompoundSelectorEnd,
    SelectorRef(Handle),
    SpaceCombinator,
    /// `>`
    ChildCombinator,
    /// `>>`
    DoubledChildCombinator,
    /// `+`
    NextSiblingCombinator,
    /// `~`
    SubsequentSiblingCombinator,

    Property(String),
    PropertyRef(Handle),
    Value(String),
    ValueRef(Handle),
    CompoundValueStart,
    CompoundValueEnd,

    FunctionStart(String),
    FunctionEnd,
    /// Start of a string group; the payload is the quote the string opened
    /// with.
    StringStart(String),
    StringEnd,

    /// Reserved for the at-rule grammar (`@media`/`@supports` conditions).
    Condition(String),
    /// Reserved for the at-rule grammar (`@keyframes` names).
    AnimationName(String),
    /// Reserved for the at-rule grammar: a whole interpolated partial.
    PartialRef(Handle),
}

impl Node {
    /// True for nodes that open a group.
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(
            self,
            Node::RuleStart(_)
                | Node::CompoundSelectorStart
                | Node::CompoundValueStart
                | Node::FunctionStart(_)
                | Node::StringStart(_)
        )
    }

    /// True for nodes that close a group.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(
            self,
            Node::RuleEnd
                | Node::CompoundSelectorEnd
                | Node::CompoundValueEnd
                | Node::FunctionEnd
                | Node::StringEnd
        )
    }

    /// True for the selector combinator nodes.
    #[must_use]
    pub fn is_combinator(&self) -> bool {
        matches!(
            self,
            Node::SpaceCombinator
                | Node::ChildCombinator
                | Node::DoubledChildCombinator
                | Node::NextSiblingCombinator
                | Node::SubsequentSiblingCombinator
        )
    }

    /// Stable node-kind label, the name downstream encoders key on.
    pub fn name(&self) -> &'static str {
        match self {
            Node::RuleStart(_) => "ruleStart",
            Node::RuleEnd => "ruleEnd",
            Node::RuleName(_) => "ruleName",
            Node::Selector(_) => "selector",
            Node::ParentSelector => "parentSelector",
            Node::UniversalSelector => "universalSelector",
            Node::CompoundSelectorStart => "compoundSelectorStart",
            Node::CompoundSelectorEnd => "compoundSelectorEnd",
            Node::SelectorRef(_) => "selectorRef",
            Node::SpaceCombinator => "spaceCombinator",
            Node::ChildCombinator => "childCombinator",
            Node::DoubledChildCombinator => "doubledChildCombinator",
            Node::NextSiblingCombinator => "nextSiblingCombinator",
            Node::SubsequentSiblingCombinator => "subsequentSiblingCombinator",
            Node::Property(_) => "property",
            Node::PropertyRef(_) => "propertyRef",
            Node::Value(_) => "value",
            Node::ValueRef(_) => "valueRef",
            Node::CompoundValueStart => "compoundValueStart",
            Node::CompoundValueEnd => "compoundValueEnd",
            Node::FunctionStart(_) => "functionStart",
            Node::FunctionEnd => "functionEnd",
            Node::StringStart(_) => "stringStart",
            Node::StringEnd => "stringEnd",
            Node::Condition(_) => "condition",
            Node::AnimationName(_) => "animationName",
            Node::PartialRef(_) => "partialRef",
        }
    }
}

/// Displays the node payload: the carried text, the rule kind label or the
/// interpolation handle. Nodes without a payload display as empty.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Node::RuleStart(kind) => kind.name().to_string(),
            Node::RuleName(value)
            | Node::Selector(value)
            | Node::Property(value)
            | Node::Value(value)
            | Node::FunctionStart(value)
            | Node::StringStart(value)
            | Node::Condition(value)
            | Node::AnimationName(value) => value.clone(),
            Node::SelectorRef(handle)
            | Node::PropertyRef(handle)
            | Node::ValueRef(handle)
            | Node::PartialRef(handle) => handle.to_string(),
            _ => String::new(),
        };

        write!(f, "{s}")
    }
}
