//! Character creation: assigning the standard array to the six attributes
//!
//! Every attribute line picks one value from [`STANDARD_ARRAY`]. A value can
//! only be held by one line; picking it elsewhere resets the previous holder.

use strum::{Display, EnumIter, IntoEnumIterator};

/// Values handed out to the attributes, one each.
pub const STANDARD_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

pub const ATTRIBUTE_COUNT: usize = 6;

/// Result of a choice on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Value assigned, nothing else changed.
    Assigned,
    /// Value assigned; the line that held it before was reset.
    Displaced(Attribute),
    /// Line reset to unset.
    Cleared,
}

/// State of the character creation overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterCreation {
    /// Index into [`STANDARD_ARRAY`] per attribute line, `None` when unset.
    choices: [Option<usize>; ATTRIBUTE_COUNT],
    cursor: usize,
}

impl CharacterCreation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_up(&mut self) {
        self.cursor = if self.cursor == 0 {
            ATTRIBUTE_COUNT - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1) % ATTRIBUTE_COUNT;
    }

    /// Value on a line, if set.
    pub fn value(&self, line: usize) -> Option<i32> {
        self.choices
            .get(line)
            .copied()
            .flatten()
            .map(|idx| STANDARD_ARRAY[idx])
    }

    /// Assign `STANDARD_ARRAY[option]` to `line`, or clear it with `None`.
    pub fn choose(&mut self, line: usize, option: Option<usize>) -> Choice {
        if line >= ATTRIBUTE_COUNT {
            return Choice::Cleared;
        }
        let Some(option) = option.filter(|o| *o < STANDARD_ARRAY.len()) else {
            self.choices[line] = None;
            return Choice::Cleared;
        };

        let holder = (0..ATTRIBUTE_COUNT)
            .find(|&other| other != line && self.choices[other] == Some(option));
        self.choices[line] = Some(option);

        match holder {
            Some(other) => {
                self.choices[other] = None;
                Choice::Displaced(attribute_at(other))
            }
            None => Choice::Assigned,
        }
    }

    /// Step the value on the cursor line through unset and the array.
    /// `forward` goes towards lower values.
    pub fn cycle(&mut self, forward: bool) -> Choice {
        let line = self.cursor;
        // unset is slot 0, array values are 1..=len
        let slots = STANDARD_ARRAY.len() + 1;
        let current = self.choices[line].map_or(0, |idx| idx + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.choose(line, next.checked_sub(1))
    }

    /// All six values, in attribute order, once every line is set.
    pub fn confirmed_stats(&self) -> Option<[i32; ATTRIBUTE_COUNT]> {
        let mut stats = [0; ATTRIBUTE_COUNT];
        for (line, stat) in stats.iter_mut().enumerate() {
            *stat = self.value(line)?;
        }
        Some(stats)
    }

    pub fn is_complete(&self) -> bool {
        self.confirmed_stats().is_some()
    }

    /// Display rows: attribute name and current value.
    pub fn lines(&self) -> Vec<(Attribute, Option<i32>)> {
        Attribute::iter()
            .enumerate()
            .map(|(line, attr)| (attr, self.value(line)))
            .collect()
    }
}

fn attribute_at(line: usize) -> Attribute {
    Attribute::iter().nth(line).unwrap_or(Attribute::Strength)
}
