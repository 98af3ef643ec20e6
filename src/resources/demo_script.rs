use bevy::prelude::*;

/// One step of the demo conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    /// Replace the dialogue box contents.
    Say(&'static str),
    /// Continue the current line.
    Continue(&'static str),
}

/// Sample lines cycled by the demo scene.
#[derive(Resource, Debug, Clone)]
pub struct DemoScript {
    pub lines: Vec<ScriptLine>,
    /// Index of the next line to show.
    pub cursor: usize,
}

impl Default for DemoScript {
    fn default() -> Self {
        Self {
            lines: vec![
                ScriptLine::Say("Ahoy! The harbour master wants a word."),
                ScriptLine::Continue(" He says your papers are... irregular."),
                ScriptLine::Say("Fog's rolling in off the point."),
                ScriptLine::Continue(" Best weigh anchor before the tide turns."),
                ScriptLine::Say("   "),
                ScriptLine::Say("¡Buen viento y buena mar!"),
            ],
            cursor: 0,
        }
    }
}

impl DemoScript {
    /// Returns the next line, wrapping back to the start.
    pub fn advance(&mut self) -> Option<ScriptLine> {
        if self.lines.is_empty() {
            return None;
        }
        let line = self.lines[self.cursor % self.lines.len()].clone();
        self.cursor = (self.cursor + 1) % self.lines.len();
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps() {
        let mut script = DemoScript {
            lines: vec![ScriptLine::Say("a"), ScriptLine::Continue("b")],
            cursor: 0,
        };
        assert_eq!(script.advance(), Some(ScriptLine::Say("a")));
        assert_eq!(script.advance(), Some(ScriptLine::Continue("b")));
        assert_eq!(script.advance(), Some(ScriptLine::Say("a")));
    }

    #[test]
    fn test_empty_script() {
        let mut script = DemoScript { lines: Vec::new(), cursor: 0 };
        assert_eq!(script.advance(), None);
    }
}
