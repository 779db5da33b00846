use colored::Colorize;

use crate::types::{EditAction, EditScript, Word};

/// Rebuilds a sentence from its tokens.
pub fn render_sentence<T: Word>(tokens: &[T]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(token.text());
        if token.space_after() {
            out.push(' ');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

struct TransitionLine {
    line: String,
}

impl TransitionLine {
    fn new() -> Self {
        Self {
            line: String::new(),
        }
    }

    fn gap(&mut self, space_after: bool) {
        if space_after {
            self.line.push(' ');
        }
    }

    fn add_same(&mut self, text: &str, space_after: bool) {
        self.line.push_str(text);
        self.gap(space_after);
    }

    fn add_removed(&mut self, text: &str, space_after: bool) {
        self.line
            .push_str(&format!("{}", text.red().strikethrough()));
        self.gap(space_after);
    }

    fn add_inserted(&mut self, text: &str, space_after: bool) {
        self.line.push_str(&format!("{}", text.green()));
        self.gap(space_after);
    }

    fn add_substitution(&mut self, left: &str, right: &str, space_after: bool) {
        self.line
            .push_str(&format!("{}", left.red().strikethrough()));
        self.line.push_str(&format!("{}", right.green()));
        self.gap(space_after);
    }

    fn output(mut self) -> String {
        self.line.truncate(self.line.trim_end().len());
        self.line
    }
}

/// One line showing the whole transition: kept words plain, removed words
/// struck through in red, new words in green. Removals appear at their
/// position in the old sentence.
pub fn render_transition<T: Word>(script: &EditScript<'_, T>) -> String {
    let mut by_target: Vec<Option<EditAction<'_>>> = vec![None; script.to.len()];
    for action in script.actions() {
        if let Some(to_index) = action.to_index() {
            by_target[to_index] = Some(action);
        }
    }
    let mut removals = script.remove.clone();
    removals.sort_by_key(|r| r.from_index);
    let mut removals = removals.into_iter().peekable();

    let mut output = TransitionLine::new();
    for (to_index, action) in by_target.into_iter().enumerate() {
        let Some(action) = action else {
            continue;
        };
        if let Some(from_index) = action.from_index() {
            while let Some(removal) = removals.next_if(|r| r.from_index < from_index) {
                output.add_removed(removal.word, script.from[removal.from_index].space_after());
            }
        }
        let space_after = script.to[to_index].space_after();
        match action {
            EditAction::Keep(keep) => output.add_same(keep.word, space_after),
            EditAction::Insert(insert) => output.add_inserted(insert.word, space_after),
            EditAction::Substitute(sub) => {
                output.add_substitution(sub.from_word, sub.to_word, space_after)
            }
            EditAction::Remove(_) => {}
        }
    }
    for removal in removals {
        output.add_removed(removal.word, script.from[removal.from_index].space_after());
    }
    output.output()
}

/// Short description such as `cost 3: 1 removed, 0 inserted, 2 substituted`.
pub fn summary<T>(script: &EditScript<'_, T>) -> String {
    format!(
        "cost {}: {} removed, {} inserted, {} substituted",
        script.cost,
        script.remove.len(),
        script.insert.len(),
        script.substitute.len()
    )
}
