//! Constraint generators translating a grid layout into engine rules.

use crate::{
    grid::layout::{Layout, TennerVariable},
    solver::{
        constraint::Constraint,
        constraints::{all_different::AllDifferent, column_sum::ColumnSum},
    },
};

/// One [`ColumnSum`] per column: the column's cells, top to bottom, with
/// the column's sum target as the final variable.
pub fn sum_constraints(layout: &Layout) -> Vec<Constraint<TennerVariable>> {
    (0..layout.columns())
        .map(|col| {
            Constraint::ColumnSum(ColumnSum::new(layout.column_cells(col), layout.target(col)))
        })
        .collect()
}

/// The puzzle's difference rules as [`AllDifferent`] groups, two families:
///
/// * one group per row, because a row never repeats a digit;
/// * one group per cell that has a row below it, holding the cell plus its
///   vertical and diagonal neighbours there, because touching cells differ.
///
/// Each adjacency group lists its upper cell first, making that cell the
/// group's propagation owner. Pairing downward only is enough: the cell
/// below sees the same pair from its own row's perspective, and pairing in
/// both directions would just duplicate every adjacency.
pub fn difference_constraints(layout: &Layout) -> Vec<Constraint<TennerVariable>> {
    let mut constraints = Vec::new();
    for row in 0..layout.rows() {
        constraints.push(Constraint::AllDifferent(AllDifferent::new(
            layout.row_cells(row),
        )));
    }
    for row in 0..layout.rows() - 1 {
        for col in 0..layout.columns() {
            let mut group = vec![layout.cell(row, col)];
            group.extend(layout.neighbours_below(row, col));
            constraints.push(Constraint::AllDifferent(AllDifferent::new(group)));
        }
    }
    constraints
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn one_sum_constraint_per_column_with_target_last() {
        let layout = Layout::with_columns(3, 4).unwrap();
        let constraints = sum_constraints(&layout);
        assert_eq!(constraints.len(), 4);

        let Constraint::ColumnSum(first) = &constraints[0] else {
            panic!("expected a column sum");
        };
        assert_eq!(first.addends(), &layout.column_cells(0)[..]);
        assert_eq!(first.target(), &layout.target(0));
    }

    #[test]
    fn difference_groups_cover_rows_and_adjacencies() {
        let layout = Layout::with_columns(3, 4).unwrap();
        let constraints = difference_constraints(&layout);
        // 3 row groups + one adjacency group per cell of the first two rows.
        assert_eq!(constraints.len(), 3 + 2 * 4);
    }

    #[test]
    fn row_groups_span_their_whole_row() {
        let layout = Layout::with_columns(2, 3).unwrap();
        let constraints = difference_constraints(&layout);
        let Constraint::AllDifferent(second_row) = &constraints[1] else {
            panic!("expected a difference group");
        };
        assert_eq!(second_row.variables(), &layout.row_cells(1)[..]);
    }

    #[test]
    fn adjacency_groups_are_owned_by_their_upper_cell() {
        let layout = Layout::with_columns(2, 4).unwrap();
        let constraints = difference_constraints(&layout);
        // Groups 0..2 are the rows; the adjacency family follows row-major.
        let Constraint::AllDifferent(corner) = &constraints[2] else {
            panic!("expected a difference group");
        };
        assert_eq!(
            corner.variables(),
            &[layout.cell(0, 0), layout.cell(1, 0), layout.cell(1, 1)]
        );
        assert_eq!(corner.owner(), Some(&layout.cell(0, 0)));

        let Constraint::AllDifferent(inner) = &constraints[3] else {
            panic!("expected a difference group");
        };
        assert_eq!(
            inner.variables(),
            &[
                layout.cell(0, 1),
                layout.cell(1, 0),
                layout.cell(1, 1),
                layout.cell(1, 2)
            ]
        );
    }

    #[test]
    fn single_row_grids_have_no_adjacency_groups() {
        let layout = Layout::with_columns(1, 5).unwrap();
        assert_eq!(difference_constraints(&layout).len(), 1);
    }
}
