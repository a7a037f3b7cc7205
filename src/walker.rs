use crate::node::Node;
use std::io::Write;

/// The walker prints a flat node stream as an indented tree, one node per
/// line. Start nodes open a level, end nodes close it.
pub struct Walker<'a> {
    nodes: &'a [Node],
}

impl<'a> Walker<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self { nodes }
    }

    pub fn walk_stdout(&self) {
        let _ = self.walk(&mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = self.walk(&mut output);

        String::from_utf8_lossy(&output).into_owned()
    }

    pub fn walk(&self, f: &mut dyn Write) -> Result<(), std::io::Error> {
        let mut depth = 0usize;

        for node in self.nodes {
            if node.is_end() {
                depth = depth.saturating_sub(1);
            }

            let prefix = " ".repeat(depth * 2);
            let payload = node.to_string();
            if payload.is_empty() {
                writeln!(f, "{}[{}]", prefix, node.name())?;
            } else {
                writeln!(f, "{}[{}] {}", prefix, node.name(), payload)?;
            }

            if node.is_start() {
                depth += 1;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RuleKind;

    #[test]
    fn indents_across_start_end_pairs() {
        let nodes = vec![
            Node::RuleStart(RuleKind::Style),
            Node::CompoundSelectorStart,
            Node::Selector(".test".to_string()),
            Node::FunctionStart(":not".to_string()),
            Node::Selector(".first".to_string()),
            Node::FunctionEnd,
            Node::CompoundSelectorEnd,
            Node::RuleEnd,
        ];

        let expected = "\
[ruleStart] style
  [compoundSelectorStart]
    [selector] .test
    [functionStart] :not
      [selector] .first
    [functionEnd]
  [compoundSelectorEnd]
[ruleEnd]
";

        assert_eq!(Walker::new(&nodes).walk_to_string(), expected);
    }
}
