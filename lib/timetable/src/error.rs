use snafu::Snafu;

use ctt_sat_core::card::CardinalityError;

pub type Result<T, E = EncodeError> = std::result::Result<T, E>;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum EncodeError {
    #[snafu(display("Duplicate {} id '{}'", kind, id))]
    DuplicateId { kind: &'static str, id: String },

    #[snafu(display("Curriculum '{}' refers to unknown course '{}'", curriculum, course))]
    UnknownCurriculumCourse { curriculum: String, course: String },

    #[snafu(display("Unavailability refers to unknown course '{}'", course))]
    UnknownUnavailableCourse { course: String },

    #[snafu(display(
        "Unavailability of '{}' at day {} period {} is outside of {} days x {} periods",
        course,
        day,
        period,
        num_days,
        periods_per_day
    ))]
    SlotOutOfRange {
        course: String,
        day: usize,
        period: usize,
        num_days: usize,
        periods_per_day: usize,
    },

    #[snafu(display("Course '{}' must have at least one lecture", course))]
    ZeroLectures { course: String },

    #[snafu(display("Instance needs {} variables, more than a literal can address", required))]
    TooManyVariables { required: u128 },

    #[snafu(display("Total soft weight does not fit in 64 bits"))]
    WeightOverflow,

    #[snafu(display("Invalid {} constraint for '{}': {}", constraint, owner, source))]
    Cardinality {
        constraint: &'static str,
        owner: String,
        source: CardinalityError,
    },
}
