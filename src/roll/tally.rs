use crate::common::UInt;
use std::fmt;

/// The faces one dice group produced.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DieTally {
    pub sides: UInt,
    pub faces: Vec<UInt>,
}

impl DieTally {
    pub fn new(sides: UInt, faces: Vec<UInt>) -> Self {
        Self { sides, faces }
    }
}

/// Every face rolled for one expression, grouped by dice group in
/// evaluation order.
///
/// Faces always stay in the group that rolled them. A display shuffle only
/// records the order faces are shown in.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Tally {
    groups: Vec<DieTally>,
    /// Display slot `i` shows the face at this roll-order index.
    display: Option<Vec<UInt>>,
}

impl Tally {
    pub fn push(&mut self, group: DieTally) {
        self.groups.push(group);
        self.display = None;
    }

    pub fn groups(&self) -> &[DieTally] {
        &self.groups
    }

    /// Faces in roll order, whatever the display order.
    pub fn faces(&self) -> impl Iterator<Item = UInt> + '_ {
        self.groups.iter().flat_map(|g| g.faces.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.faces.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_shuffled(&self) -> bool {
        self.display.is_some()
    }

    /// How many `sides`-sided dice show `face`.
    pub fn count_on(&self, sides: UInt, face: UInt) -> usize {
        self.groups
            .iter()
            .filter(|g| g.sides == sides)
            .map(|g| g.faces.iter().filter(|&&f| f == face).count())
            .sum()
    }

    /// Picks a new display order; `shuffle` reorders roll-order indices.
    pub fn shuffle_display_with(&mut self, shuffle: impl FnOnce(&mut [UInt])) {
        let mut order: Vec<UInt> = (0..self.len() as UInt).collect();
        shuffle(&mut order);
        self.display = Some(order);
    }

    /// Renders each group as `[a, b, c]`; `symbol` gets a face's own side
    /// count and the face and picks its text.
    ///
    /// Symbols are chosen before any display shuffle is applied, so a face
    /// keeps its text wherever it is shown.
    pub fn render_with(&self, mut symbol: impl FnMut(UInt, UInt) -> String) -> String {
        let symbols: Vec<String> = self
            .groups
            .iter()
            .flat_map(|g| g.faces.iter().map(move |&f| (g.sides, f)))
            .map(|(sides, face)| symbol(sides, face))
            .collect();

        let shown: Vec<&str> = match &self.display {
            Some(order) => order.iter().map(|&i| symbols[i as usize].as_str()).collect(),
            None => symbols.iter().map(String::as_str).collect(),
        };

        let mut rest = shown.as_slice();
        self.groups
            .iter()
            .map(|g| {
                let (head, tail) = rest.split_at(g.faces.len());
                rest = tail;
                format!("[{}]", head.join(", "))
            })
            .collect()
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(|_, face| face.to_string()))
    }
}
