//! Validated, index-resolved view of an [`Instance`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;
use snafu::{ensure, OptionExt};

use crate::error::*;
use crate::instance::Instance;

/// Every id of the instance resolved to a position in its declaration list.
#[derive(Debug)]
pub struct Problem<'a> {
    pub instance: &'a Instance,
    /// Member course indices per curriculum, duplicates removed, in order of appearance.
    pub members: Vec<Vec<usize>>,
    /// Curricula containing each course.
    pub curricula_of: Vec<Vec<usize>>,
    /// Groups of two or more courses taught by the same teacher, ordered by teacher id.
    pub teacher_groups: Vec<Vec<usize>>,
    /// `(course, slot)` pairs that are forbidden.
    pub unavailable: Vec<(usize, usize)>,
}

fn index_ids<'a, I>(kind: &'static str, ids: I) -> Result<HashMap<&'a str, usize>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index = HashMap::new();
    for (i, id) in ids.into_iter().enumerate() {
        ensure!(index.insert(id, i).is_none(), DuplicateIdSnafu { kind, id });
    }
    Ok(index)
}

impl<'a> Problem<'a> {
    pub fn new(instance: &'a Instance) -> Result<Self> {
        ensure!(
            instance.num_days.checked_mul(instance.periods_per_day).is_some(),
            TooManyVariablesSnafu {
                required: instance.num_days as u128 * instance.periods_per_day as u128,
            }
        );
        let course_index = index_ids("course", instance.courses.iter().map(|c| c.id.as_str()))?;
        index_ids("room", instance.rooms.iter().map(|r| r.id.as_str()))?;
        index_ids("curriculum", instance.curricula.iter().map(|k| k.id.as_str()))?;

        for course in instance.courses.iter() {
            ensure!(course.num_lectures > 0, ZeroLecturesSnafu { course: &course.id });
        }

        let mut members = Vec::with_capacity(instance.curricula.len());
        let mut curricula_of = vec![Vec::new(); instance.courses.len()];
        for (k, curriculum) in instance.curricula.iter().enumerate() {
            let mut courses = Vec::with_capacity(curriculum.courses.len());
            for id in curriculum.courses.iter() {
                let c = *course_index.get(id.as_str()).context(UnknownCurriculumCourseSnafu {
                    curriculum: &curriculum.id,
                    course: id,
                })?;
                if !courses.contains(&c) {
                    courses.push(c);
                    curricula_of[c].push(k);
                }
            }
            members.push(courses);
        }

        let mut by_teacher: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (c, course) in instance.courses.iter().enumerate() {
            by_teacher.entry(course.teacher.as_str()).or_default().push(c);
        }
        let teacher_groups = by_teacher.into_values().filter(|group| group.len() >= 2).collect();

        let mut unavailable = Vec::with_capacity(instance.unavailabilities.len());
        for u in instance.unavailabilities.iter() {
            let c = *course_index
                .get(u.course.as_str())
                .context(UnknownUnavailableCourseSnafu { course: &u.course })?;
            ensure!(
                u.day < instance.num_days && u.period < instance.periods_per_day,
                SlotOutOfRangeSnafu {
                    course: &u.course,
                    day: u.day,
                    period: u.period,
                    num_days: instance.num_days,
                    periods_per_day: instance.periods_per_day,
                }
            );
            unavailable.push((c, instance.slot(u.day, u.period)));
        }

        Ok(Self {
            instance,
            members,
            curricula_of,
            teacher_groups,
            unavailable,
        })
    }

    pub fn num_courses(&self) -> usize {
        self.instance.courses.len()
    }

    pub fn num_rooms(&self) -> usize {
        self.instance.rooms.len()
    }

    pub fn num_curricula(&self) -> usize {
        self.instance.curricula.len()
    }

    pub fn num_days(&self) -> usize {
        self.instance.num_days
    }

    pub fn total_slots(&self) -> usize {
        self.instance.total_slots()
    }

    /// Unordered course pairs `(i, j)`, `i < j`, sharing at least one curriculum.
    pub fn curriculum_pairs(&self) -> BTreeSet<(usize, usize)> {
        self.members
            .iter()
            .flat_map(|courses| {
                courses
                    .iter()
                    .tuple_combinations()
                    .map(|(&a, &b)| if a < b { (a, b) } else { (b, a) })
            })
            .collect()
    }

    /// Unordered pairs of courses with the same teacher and no shared curriculum.
    pub fn teacher_pairs(&self) -> BTreeSet<(usize, usize)> {
        let shared = self.curriculum_pairs();
        self.teacher_groups
            .iter()
            .flat_map(|group| group.iter().copied().tuple_combinations())
            .filter(|pair| !shared.contains(pair))
            .collect()
    }
}
