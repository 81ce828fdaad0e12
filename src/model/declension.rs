// src/model/declension.rs

vocabulary! {
    Number {
        Singular => "singular",
        Plural => "plural",
    }
}

vocabulary! {
    Case {
        Nominative => "nominative",
        Genitive => "genitive",
        Dative => "dative",
        Accusative => "accusative",
    }
}

impl Number {
    fn index(&self) -> usize {
        match self {
            Number::Singular => 0,
            Number::Plural => 1,
        }
    }
}

impl Case {
    fn index(&self) -> usize {
        match self {
            Case::Nominative => 0,
            Case::Genitive => 1,
            Case::Dative => 2,
            Case::Accusative => 3,
        }
    }
}

/// Four cases per number, in `Case::ALL` order.
pub type CaseRow = [String; 4];

/// Number × case → "article form". Always exactly eight cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclensionTable {
    cells: [CaseRow; 2],
}

impl DeclensionTable {
    pub fn new(singular: CaseRow, plural: CaseRow) -> Self {
        Self { cells: [singular, plural] }
    }

    pub fn get(&self, number: Number, case: Case) -> &str {
        &self.cells[number.index()][case.index()]
    }

    pub fn row(&self, number: Number) -> &CaseRow {
        &self.cells[number.index()]
    }

    /// All eight cells, singular first, each number in `Case::ALL` order.
    pub fn cells(&self) -> impl Iterator<Item = (Number, Case, &str)> {
        Number::ALL.iter().flat_map(move |n| {
            Case::ALL.iter().map(move |c| (*n, *c, self.get(*n, *c)))
        })
    }

    pub fn is_complete(&self) -> bool {
        self.cells().all(|(_, _, cell)| !cell.trim().is_empty())
    }
}
