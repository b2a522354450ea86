//! Immutable description of a curriculum-based course timetabling instance.
//!
//! Courses, rooms and curricula keep their declaration order, which fixes
//! the numbering of every variable derived from them.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub teacher: String,
    pub num_lectures: usize,
    pub min_working_days: usize,
    pub num_students: usize,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        teacher: impl Into<String>,
        num_lectures: usize,
        min_working_days: usize,
        num_students: usize,
    ) -> Self {
        Self {
            id: id.into(),
            teacher: teacher.into(),
            num_lectures,
            min_working_days,
            num_students,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub capacity: usize,
}

impl Room {
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self { id: id.into(), capacity }
    }
}

/// Courses sharing students; they never run at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curriculum {
    pub id: String,
    pub courses: Vec<String>,
}

impl Curriculum {
    pub fn new<I>(id: impl Into<String>, courses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            id: id.into(),
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Course `course` can't be taught at `(day, period)`, both zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailability {
    pub course: String,
    pub day: usize,
    pub period: usize,
}

impl Unavailability {
    pub fn new(course: impl Into<String>, day: usize, period: usize) -> Self {
        Self {
            course: course.into(),
            day,
            period,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: String,
    pub num_days: usize,
    pub periods_per_day: usize,
    pub courses: Vec<Course>,
    pub rooms: Vec<Room>,
    pub curricula: Vec<Curriculum>,
    pub unavailabilities: Vec<Unavailability>,
}

impl Instance {
    pub fn new(name: impl Into<String>, num_days: usize, periods_per_day: usize) -> Self {
        Self {
            name: name.into(),
            num_days,
            periods_per_day,
            courses: Vec::new(),
            rooms: Vec::new(),
            curricula: Vec::new(),
            unavailabilities: Vec::new(),
        }
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curricula.push(curriculum);
        self
    }

    pub fn with_unavailability(mut self, unavailability: Unavailability) -> Self {
        self.unavailabilities.push(unavailability);
        self
    }

    pub fn total_slots(&self) -> usize {
        self.num_days * self.periods_per_day
    }

    /// Day of the absolute slot `h`.
    pub fn day_of(&self, h: usize) -> usize {
        h / self.periods_per_day
    }

    /// Absolute slots of day `d`.
    pub fn slots_of_day(&self, d: usize) -> Range<usize> {
        d * self.periods_per_day..(d + 1) * self.periods_per_day
    }

    pub fn slot(&self, day: usize, period: usize) -> usize {
        day * self.periods_per_day + period
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn curriculum(&self, id: &str) -> Option<&Curriculum> {
        self.curricula.iter().find(|k| k.id == id)
    }

    pub fn total_lectures(&self) -> usize {
        self.courses.iter().map(|c| c.num_lectures).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_arithmetic() {
        let instance = Instance::new("t", 5, 4);
        assert_eq!(instance.total_slots(), 20);
        assert_eq!(instance.day_of(0), 0);
        assert_eq!(instance.day_of(7), 1);
        assert_eq!(instance.slots_of_day(2), 8..12);
        assert_eq!(instance.slot(3, 1), 13);
    }

    #[test]
    fn test_lookup_by_id() {
        let instance = Instance::new("t", 1, 1)
            .with_course(Course::new("c1", "t1", 2, 1, 10))
            .with_room(Room::new("r1", 30))
            .with_curriculum(Curriculum::new("q1", ["c1"]));
        assert_eq!(instance.course("c1").map(|c| c.num_lectures), Some(2));
        assert_eq!(instance.room("r1").map(|r| r.capacity), Some(30));
        assert!(instance.curriculum("q1").is_some());
        assert!(instance.course("c2").is_none());
        assert_eq!(instance.total_lectures(), 2);
    }
}
