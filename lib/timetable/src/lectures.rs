use snafu::ResultExt;

use ctt_sat_core::card::Cardinality;

use crate::emit::Emitter;
use crate::error::*;
use crate::problem::Problem;
use crate::vars::Vars;

/// Every course is taught in exactly `num_lectures` slots.
pub fn lecture_counts(problem: &Problem, vars: &Vars, emitter: &mut Emitter) -> Result<()> {
    for (c, course) in problem.instance.courses.iter().enumerate() {
        let lits = vars.ch.row(c).to_vec();
        emitter
            .encode_exactly(&lits, course.num_lectures)
            .context(CardinalitySnafu {
                constraint: "lecture count",
                owner: &course.id,
            })?;
    }
    Ok(())
}
