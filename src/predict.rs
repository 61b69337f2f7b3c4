// Copyright 2026 The sparse_maq Authors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Reads a per-unit arm assignment off an already-fitted path at an
//! arbitrary budget, without re-solving. This is a pure in-memory
//! scan-and-join over the arrays already held in a [`SolverOutput`]; there is
//! no dependency on a columnar data library for it.

use crate::assemble::SolverOutput;
use crate::error::SolverError;

/// Returns, for each unit (indexed densely as in `output.unit_id_mapping`),
/// the arm index of the last path step at or under `budget`, or the control
/// arm (`0`) if the unit was never touched at or under that budget.
///
/// Errors with [`SolverError::BudgetBeyondPath`] if `output.complete_path`
/// is `false` and `budget` exceeds the cumulative spend of the last step in
/// the (truncated) path: the path simply doesn't have enough information to
/// answer at that budget, and re-fitting with a larger budget is required.
pub fn predict(output: &SolverOutput, budget: f64) -> Result<Vec<u32>, SolverError> {
    if !output.complete_path {
        if let Some(&last_spend) = output.spend.last() {
            if budget > last_spend {
                return Err(SolverError::BudgetBeyondPath(format!(
                    "requested budget {budget} exceeds the truncated path's last \
                     cumulative spend {last_spend}; re-fit with a larger budget to \
                     answer at this budget"
                )));
            }
        }
    }

    let mut assignment = vec![0u32; output.unit_id_mapping.len()];
    for i in 0..output.spend.len() {
        if output.spend[i] > budget {
            // spend is non-decreasing along the path, so nothing further
            // down the path can be at or under budget either.
            break;
        }
        assignment[output.ipath[i] as usize] = output.kpath[i];
    }
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(spend: Vec<f64>, gain: Vec<f64>, ipath: Vec<u32>, kpath: Vec<u32>, complete: bool) -> SolverOutput {
        SolverOutput {
            spend,
            gain,
            ipath,
            kpath,
            complete_path: complete,
            arm_id_mapping: vec!["dns".into(), "x".into(), "y".into()],
            unit_id_mapping: vec!["p0".into(), "p1".into()],
        }
    }

    #[test]
    fn units_never_reached_default_to_control() {
        let out = output(vec![2.0], vec![5.0], vec![0], vec![1], true);
        let assignment = predict(&out, 2.0).unwrap();
        assert_eq!(assignment, vec![1, 0]);
    }

    #[test]
    fn budget_between_steps_takes_the_last_affordable_step() {
        let out = output(vec![2.0, 5.0], vec![5.0, 9.0], vec![0, 0], vec![1, 2], true);
        assert_eq!(predict(&out, 0.0).unwrap(), vec![0, 0]);
        assert_eq!(predict(&out, 2.0).unwrap(), vec![1, 0]);
        assert_eq!(predict(&out, 3.0).unwrap(), vec![1, 0]);
        assert_eq!(predict(&out, 5.0).unwrap(), vec![2, 0]);
    }

    #[test]
    fn later_steps_for_a_unit_override_earlier_ones() {
        let out = output(
            vec![2.0, 4.0],
            vec![5.0, 9.0],
            vec![0, 0],
            vec![1, 2],
            true,
        );
        assert_eq!(predict(&out, 10.0).unwrap(), vec![2, 0]);
    }

    #[test]
    fn budget_beyond_a_truncated_path_errors() {
        let out = output(vec![2.0], vec![5.0], vec![0], vec![1], false);
        assert!(matches!(
            predict(&out, 3.0),
            Err(SolverError::BudgetBeyondPath(_))
        ));
    }

    #[test]
    fn budget_at_or_under_a_truncated_paths_last_spend_is_fine() {
        let out = output(vec![2.0], vec![5.0], vec![0], vec![1], false);
        assert!(predict(&out, 2.0).is_ok());
        assert!(predict(&out, 1.0).is_ok());
    }

    #[test]
    fn a_complete_path_accepts_any_budget() {
        let out = output(vec![2.0], vec![5.0], vec![0], vec![1], true);
        assert!(predict(&out, 1_000_000.0).is_ok());
    }

    #[test]
    fn empty_path_never_errors_and_yields_all_control() {
        let out = output(vec![], vec![], vec![], vec![], false);
        assert_eq!(predict(&out, 100.0).unwrap(), vec![0, 0]);
    }

    #[test]
    fn predict_is_idempotent_regardless_of_the_fit_time_budget() {
        // The same path content, truncated at two different fit budgets,
        // must answer identically for any query budget at or under both.
        let wide = output(
            vec![2.0, 4.0, 9.0],
            vec![5.0, 9.0, 14.0],
            vec![0, 0, 1],
            vec![1, 2, 1],
            false,
        );
        let narrow = output(
            vec![2.0, 4.0],
            vec![5.0, 9.0],
            vec![0, 0],
            vec![1, 2],
            false,
        );
        for query_budget in [0.0, 1.5, 2.0, 3.0, 4.0] {
            assert_eq!(
                predict(&wide, query_budget).unwrap(),
                predict(&narrow, query_budget).unwrap(),
                "query_budget={query_budget}"
            );
        }
    }
}
