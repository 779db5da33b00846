use serde::Serialize;

pub trait Word {
    fn text(&self) -> &str;
    /// Whether the raw sentence had whitespace right after this unit.
    fn space_after(&self) -> bool {
        true
    }
}

impl Word for String {
    fn text(&self) -> &str {
        self
    }
}

impl Word for &str {
    fn text(&self) -> &str {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keep<'a> {
    pub from_index: usize,
    pub to_index: usize,
    pub word: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remove<'a> {
    pub from_index: usize,
    pub word: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insert<'a> {
    pub to_index: usize,
    pub word: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitute<'a> {
    pub from_index: usize,
    pub to_index: usize,
    pub from_word: &'a str,
    pub to_word: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction<'a> {
    Keep(Keep<'a>),
    Remove(Remove<'a>),
    Insert(Insert<'a>),
    Substitute(Substitute<'a>),
}

impl<'a> EditAction<'a> {
    pub fn from_index(&self) -> Option<usize> {
        match self {
            EditAction::Keep(k) => Some(k.from_index),
            EditAction::Remove(r) => Some(r.from_index),
            EditAction::Insert(_) => None,
            EditAction::Substitute(s) => Some(s.from_index),
        }
    }

    pub fn to_index(&self) -> Option<usize> {
        match self {
            EditAction::Keep(k) => Some(k.to_index),
            EditAction::Remove(_) => None,
            EditAction::Insert(i) => Some(i.to_index),
            EditAction::Substitute(s) => Some(s.to_index),
        }
    }

    pub fn cost(&self) -> usize {
        match self {
            EditAction::Keep(_) => 0,
            _ => 1,
        }
    }
}

/// Everything needed to turn `from` into `to`, with positions on both sides.
#[derive(Debug, Clone, Serialize)]
pub struct EditScript<'a, T> {
    pub from: &'a [T],
    pub to: &'a [T],
    pub keep: Vec<Keep<'a>>,
    pub remove: Vec<Remove<'a>>,
    pub insert: Vec<Insert<'a>>,
    pub substitute: Vec<Substitute<'a>>,
    pub cost: usize,
}

impl<'a, T: Word> EditScript<'a, T> {
    pub fn new(from: &'a [T], to: &'a [T]) -> Self {
        Self {
            from,
            to,
            keep: Vec::new(),
            remove: Vec::new(),
            insert: Vec::new(),
            substitute: Vec::new(),
            cost: 0,
        }
    }

    pub fn push_keep(&mut self, from_index: usize, to_index: usize) {
        let to = self.to;
        self.keep.push(Keep {
            from_index,
            to_index,
            word: to[to_index].text(),
        });
    }

    pub fn push_remove(&mut self, from_index: usize) {
        let from = self.from;
        self.remove.push(Remove {
            from_index,
            word: from[from_index].text(),
        });
        self.cost += 1;
    }

    pub fn push_insert(&mut self, to_index: usize) {
        let to = self.to;
        self.insert.push(Insert {
            to_index,
            word: to[to_index].text(),
        });
        self.cost += 1;
    }

    pub fn push_substitute(&mut self, from_index: usize, to_index: usize) {
        let (from, to) = (self.from, self.to);
        self.substitute.push(Substitute {
            from_index,
            to_index,
            from_word: from[from_index].text(),
            to_word: to[to_index].text(),
        });
        self.cost += 1;
    }
}

impl<'a, T> EditScript<'a, T> {
    pub fn is_identity(&self) -> bool {
        self.cost == 0 && self.from.len() == self.to.len()
    }

    /// All actions, in the order a renderer applies them: substitutions,
    /// removals, keeps, then insertions.
    pub fn actions(&self) -> impl Iterator<Item = EditAction<'a>> + '_ {
        self.substitute
            .iter()
            .cloned()
            .map(EditAction::Substitute)
            .chain(self.remove.iter().cloned().map(EditAction::Remove))
            .chain(self.keep.iter().cloned().map(EditAction::Keep))
            .chain(self.insert.iter().cloned().map(EditAction::Insert))
    }
}
