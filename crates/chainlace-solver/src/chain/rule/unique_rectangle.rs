use chainlace_core::{Digit, DigitPositions, DigitSet, House, Position};

use super::{BoxedChainingRule, ChainingRule, LinkContext};
use crate::{
    TechniqueGrid,
    chain::{CandidateSet, GroupedLinkPattern, LinkTypes, UniqueRectanglePattern},
};

/// Which deadly-pattern argument a [`UniqueRectangleRule`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueRectangleCase {
    /// One extra digit: its cells in the two rows (or columns) are strongly linked.
    SameDigit,
    /// Two extra digits: their cells are strongly linked.
    DifferentDigit,
    /// An extra digit on one side against a UR digit outside the other side.
    SingleSideExternal,
    /// The two UR digits outside the rectangle, in a house of the extra cells.
    DoubleSideExternal,
}

impl UniqueRectangleCase {
    /// Link type produced by this case.
    #[must_use]
    pub const fn link_type(self) -> LinkTypes {
        match self {
            UniqueRectangleCase::SameDigit => LinkTypes::UNIQUE_RECTANGLE_SAME_DIGIT,
            UniqueRectangleCase::DifferentDigit => LinkTypes::UNIQUE_RECTANGLE_DIFFERENT_DIGIT,
            UniqueRectangleCase::SingleSideExternal => {
                LinkTypes::UNIQUE_RECTANGLE_SINGLE_SIDE_EXTERNAL
            }
            UniqueRectangleCase::DoubleSideExternal => {
                LinkTypes::UNIQUE_RECTANGLE_DOUBLE_SIDE_EXTERNAL
            }
        }
    }

    fn accepts_extra_count(self, count: usize) -> bool {
        match self {
            UniqueRectangleCase::SameDigit => count == 1,
            UniqueRectangleCase::DifferentDigit => count == 2,
            UniqueRectangleCase::SingleSideExternal | UniqueRectangleCase::DoubleSideExternal => {
                count >= 2
            }
        }
    }
}

/// Strong links that keep a unique rectangle from becoming a deadly pattern.
///
/// Four undecided cells on two rows, two columns and two boxes would allow two
/// solutions if they were reduced to the same two digits. On a puzzle with a unique
/// solution some extra candidate must survive, which each case turns into strong links.
///
/// Nothing is produced unless [`ChainingOptions::assume_unique_solution`] is set.
///
/// [`ChainingOptions::assume_unique_solution`]: crate::chain::ChainingOptions::assume_unique_solution
#[derive(Debug, Clone, Copy)]
pub struct UniqueRectangleRule {
    case: UniqueRectangleCase,
}

impl UniqueRectangleRule {
    /// Creates the rule for one case.
    #[must_use]
    pub const fn new(case: UniqueRectangleCase) -> Self {
        Self { case }
    }

    /// The case this rule argues.
    #[must_use]
    pub const fn case(&self) -> UniqueRectangleCase {
        self.case
    }

    fn strong_links(
        &self,
        grid: &TechniqueGrid,
        rectangle: &Rectangle,
    ) -> Vec<(CandidateSet, CandidateSet)> {
        match self.case {
            UniqueRectangleCase::SameDigit => same_digit_links(grid, rectangle),
            UniqueRectangleCase::DifferentDigit => different_digit_links(grid, rectangle),
            UniqueRectangleCase::SingleSideExternal => single_side_links(grid, rectangle),
            UniqueRectangleCase::DoubleSideExternal => double_side_links(grid, rectangle),
        }
    }
}

impl ChainingRule for UniqueRectangleRule {
    fn link_type(&self) -> LinkTypes {
        self.case.link_type()
    }

    fn clone_box(&self) -> BoxedChainingRule {
        Box::new(*self)
    }

    fn collect_links(&self, context: &mut LinkContext<'_>) {
        if !context.options().assume_unique_solution() {
            return;
        }
        let grid = context.grid();
        for rectangle in rectangles(grid) {
            if !self.case.accepts_extra_count(rectangle.extras.len()) {
                continue;
            }
            let pattern = GroupedLinkPattern::UniqueRectangle(rectangle.pattern);
            for (a, b) in self.strong_links(grid, &rectangle) {
                if context.add_strong(a, b, Some(pattern)) {
                    context.add_group_weak_links(a);
                    context.add_group_weak_links(b);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rectangle {
    pattern: UniqueRectanglePattern,
    rows: [House; 2],
    columns: [House; 2],
    extras: DigitSet,
}

impl Rectangle {
    fn cells(&self) -> DigitPositions {
        self.pattern.cells
    }

    fn digits(&self) -> DigitSet {
        DigitSet::from_iter([self.pattern.digits.0, self.pattern.digits.1])
    }
}

/// Every rectangle of undecided cells with a pair of digits that could fill it twice.
fn rectangles(grid: &TechniqueGrid) -> Vec<Rectangle> {
    let undecided = grid.undecided_cells();
    let mut found = vec![];
    for y1 in 0..9 {
        for y2 in y1 + 1..9 {
            for x1 in 0..9 {
                for x2 in x1 + 1..9 {
                    // Exactly two boxes.
                    if (y1 / 3 == y2 / 3) == (x1 / 3 == x2 / 3) {
                        continue;
                    }
                    let cells = DigitPositions::from_iter([
                        Position::new(x1, y1),
                        Position::new(x2, y1),
                        Position::new(x1, y2),
                        Position::new(x2, y2),
                    ]);
                    if !cells.is_subset(undecided) {
                        continue;
                    }
                    let all_digits = cells
                        .iter()
                        .fold(DigitSet::EMPTY, |acc, pos| acc | grid.candidates_at(pos));
                    let valid = all_digits
                        .iter()
                        .filter(|&digit| fills_diagonally(cells & grid.digit_positions(digit)))
                        .collect::<Vec<_>>();
                    for (i, &a) in valid.iter().enumerate() {
                        for &b in &valid[i + 1..] {
                            found.push(Rectangle {
                                pattern: UniqueRectanglePattern {
                                    cells,
                                    digits: (a, b),
                                },
                                rows: [House::Row { y: y1 }, House::Row { y: y2 }],
                                columns: [House::Column { x: x1 }, House::Column { x: x2 }],
                                extras: all_digits - DigitSet::from_iter([a, b]),
                            });
                        }
                    }
                }
            }
        }
    }
    found
}

/// Returns `true` if the cells span two rows and two columns.
fn fills_diagonally(positions: DigitPositions) -> bool {
    let (rows, columns) = positions
        .iter()
        .fold((0_u16, 0_u16), |(rows, columns), pos| {
            (rows | (1 << pos.y()), columns | (1 << pos.x()))
        });
    rows.count_ones() == 2 && columns.count_ones() == 2
}

fn extra_cells(grid: &TechniqueGrid, rectangle: &Rectangle, digit: Digit) -> DigitPositions {
    rectangle.cells() & grid.digit_positions(digit)
}

fn same_digit_links(
    grid: &TechniqueGrid,
    rectangle: &Rectangle,
) -> Vec<(CandidateSet, CandidateSet)> {
    let Some(extra) = rectangle.extras.as_single() else {
        return vec![];
    };
    let cells = extra_cells(grid, rectangle, extra);
    [rectangle.rows, rectangle.columns]
        .into_iter()
        .filter_map(|[first, second]| {
            let a = CandidateSet::new(cells & first.positions(), extra)?;
            let b = CandidateSet::new(cells & second.positions(), extra)?;
            Some((a, b))
        })
        .collect()
}

fn different_digit_links(
    grid: &TechniqueGrid,
    rectangle: &Rectangle,
) -> Vec<(CandidateSet, CandidateSet)> {
    let Some((x, y)) = rectangle.extras.as_double() else {
        return vec![];
    };
    let a = CandidateSet::new(extra_cells(grid, rectangle, x), x);
    let b = CandidateSet::new(extra_cells(grid, rectangle, y), y);
    a.zip(b).into_iter().collect()
}

fn single_side_links(
    grid: &TechniqueGrid,
    rectangle: &Rectangle,
) -> Vec<(CandidateSet, CandidateSet)> {
    let (a, b) = rectangle.pattern.digits;
    let mut links = vec![];
    for extra in rectangle.extras {
        let cells = extra_cells(grid, rectangle, extra);
        if !cells.is_in_intersection() {
            continue;
        }
        let allowed = rectangle.digits() | DigitSet::from_elem(extra);
        if cells
            .iter()
            .any(|pos| !grid.candidates_at(pos).is_subset(allowed))
        {
            continue;
        }
        let Some(extra_set) = CandidateSet::new(cells, extra) else {
            continue;
        };
        let other_side = rectangle.cells() - cells;
        for house in House::containing(other_side) {
            let locked = [a, b]
                .into_iter()
                .filter(|&digit| grid.digit_positions(digit) & house.positions() == other_side)
                .collect::<Vec<_>>();
            let [locked] = locked[..] else {
                continue;
            };
            let last = if locked == a { b } else { a };
            let outside = (house.positions() & grid.digit_positions(last)) - rectangle.cells();
            if let Some(last_set) = CandidateSet::new(outside, last) {
                links.push((extra_set, last_set));
            }
        }
    }
    links
}

fn double_side_links(
    grid: &TechniqueGrid,
    rectangle: &Rectangle,
) -> Vec<(CandidateSet, CandidateSet)> {
    let (a, b) = rectangle.pattern.digits;
    let extra_cells = rectangle
        .cells()
        .iter()
        .filter(|&pos| !(grid.candidates_at(pos) & rectangle.extras).is_empty())
        .collect::<DigitPositions>();
    House::containing(extra_cells)
        .filter_map(|house| {
            let outside = |digit| {
                let positions =
                    (house.positions() & grid.digit_positions(digit)) - rectangle.cells();
                CandidateSet::new(positions, digit)
            };
            Some((outside(a)?, outside(b)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chainlace_core::Candidate;

    use super::*;
    use crate::chain::{ChainingOptions, LinkDictionary, LinkKind};

    fn restrict(grid: &mut TechniqueGrid, x: u8, y: u8, digits: &[Digit]) {
        for digit in Digit::ALL {
            if !digits.contains(&digit) {
                grid.remove_candidate(Position::new(x, y), digit);
            }
        }
    }

    fn build(grid: &TechniqueGrid, case: UniqueRectangleCase, unique: bool) -> LinkDictionary {
        let options = ChainingOptions::grouped().with_assume_unique_solution(unique);
        let mut links = LinkDictionary::new();
        let mut context = LinkContext::new(grid, &options, case.link_type(), &mut links);
        UniqueRectangleRule::new(case).collect_links(&mut context);
        links
    }

    fn single(x: u8, y: u8, digit: Digit) -> CandidateSet {
        Candidate::new(Position::new(x, y), digit).into()
    }

    fn row_outside(y: u8, digit: Digit) -> CandidateSet {
        let positions = (2..9).map(|x| Position::new(x, y)).collect();
        CandidateSet::new(positions, digit).unwrap()
    }

    const UR: [Digit; 2] = [Digit::D1, Digit::D2];

    // Rectangle r1c1/r1c2/r4c1/r4c2 on digits 1 and 2.
    fn rectangle_grid(extras: [&[Digit]; 4]) -> TechniqueGrid {
        let mut grid = TechniqueGrid::new();
        for ((x, y), extra) in [(0, 0), (1, 0), (0, 3), (1, 3)].into_iter().zip(extras) {
            restrict(&mut grid, x, y, &[UR.as_slice(), extra].concat());
        }
        grid
    }

    #[test]
    fn test_same_digit_links_diagonal_extras() {
        let grid = rectangle_grid([&[Digit::D5], &[], &[], &[Digit::D5]]);
        let links = build(&grid, UniqueRectangleCase::SameDigit, true);
        let (a, b) = (single(0, 0, Digit::D5), single(1, 3, Digit::D5));
        assert!(links.has_link(LinkKind::Strong, a, b));
        assert!(matches!(
            links.pattern(LinkKind::Strong, a, b),
            Some(GroupedLinkPattern::UniqueRectangle(UniqueRectanglePattern {
                digits: (Digit::D1, Digit::D2),
                ..
            }))
        ));

        assert!(build(&grid, UniqueRectangleCase::SameDigit, false).is_empty());
    }

    #[test]
    fn test_same_digit_needs_both_halves() {
        let grid = rectangle_grid([&[], &[], &[], &[Digit::D5]]);
        assert!(build(&grid, UniqueRectangleCase::SameDigit, true).is_empty());
    }

    #[test]
    fn test_different_digit_links_extras() {
        let grid = rectangle_grid([&[], &[], &[Digit::D5], &[Digit::D6]]);
        let links = build(&grid, UniqueRectangleCase::DifferentDigit, true);
        assert!(links.has_link(
            LinkKind::Strong,
            single(0, 3, Digit::D5),
            single(1, 3, Digit::D6)
        ));
        assert_eq!(links.strong_count(), 1);
    }

    #[test]
    fn test_double_side_links_outside_digits() {
        let grid = rectangle_grid([&[], &[], &[Digit::D5], &[Digit::D6]]);
        let links = build(&grid, UniqueRectangleCase::DoubleSideExternal, true);
        assert!(links.has_link(
            LinkKind::Strong,
            row_outside(3, Digit::D1),
            row_outside(3, Digit::D2)
        ));
    }

    #[test]
    fn test_single_side_links_extra_to_outside_digit() {
        let mut grid = rectangle_grid([&[Digit::D5], &[Digit::D5], &[Digit::D6], &[]]);
        // Digit 1 is locked to the rectangle in row 4.
        for x in 2..9 {
            grid.remove_candidate(Position::new(x, 3), Digit::D1);
        }
        let links = build(&grid, UniqueRectangleCase::SingleSideExternal, true);
        let extra = CandidateSet::new(
            DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 0)]),
            Digit::D5,
        )
        .unwrap();
        assert!(links.has_link(LinkKind::Strong, extra, row_outside(3, Digit::D2)));
        assert_eq!(links.strong_count(), 1);
    }

    #[test]
    fn test_rectangles_need_two_boxes() {
        assert!(fills_diagonally(DigitPositions::from_iter([
            Position::new(0, 0),
            Position::new(1, 3),
        ])));
        assert!(!fills_diagonally(DigitPositions::from_iter([
            Position::new(0, 0),
            Position::new(0, 3),
        ])));
        let grid = rectangle_grid([&[], &[], &[], &[]]);
        let cells = DigitPositions::from_iter(
            [(0, 0), (1, 0), (0, 3), (1, 3)].map(|(x, y)| Position::new(x, y)),
        );
        let found = rectangles(&grid)
            .into_iter()
            .filter(|rectangle| rectangle.cells() == cells)
            .collect::<Vec<_>>();
        assert_eq!(found.len(), 1);
        assert!(found[0].extras.is_empty());
        assert_eq!(found[0].pattern.digits, (Digit::D1, Digit::D2));
    }
}
