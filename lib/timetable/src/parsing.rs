//! Reader for the ITC2007 `.ctt` text format.
//!
//! ```text
//! Name: Toy
//! Courses: 1
//! ...
//! COURSES:
//! <id> <teacher> <lectures> <min_days> <students>
//! ROOMS:
//! <id> <capacity>
//! CURRICULA:
//! <id> <n> <course_1> ... <course_n>
//! UNAVAILABILITY_CONSTRAINTS:
//! <course> <day> <period>
//! END.
//! ```

use std::fs;
use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use snafu::{ensure, OptionExt, ResultExt, Snafu};

use crate::instance::{Course, Curriculum, Instance, Room, Unavailability};

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    #[snafu(display("Could not read '{}': {}", path, source))]
    Io { path: String, source: std::io::Error },

    #[snafu(display("Line {}: unknown header field '{}'", line, key))]
    UnknownHeader { line: usize, key: String },

    #[snafu(display("Line {}: unknown section '{}'", line, name))]
    UnknownSection { line: usize, name: String },

    #[snafu(display("Line {}: malformed {} record: {}", line, section, reason))]
    MalformedRecord {
        line: usize,
        section: &'static str,
        reason: String,
    },

    #[snafu(display("Line {}: invalid number '{}': {}", line, value, source))]
    InvalidNumber {
        line: usize,
        value: String,
        source: ParseIntError,
    },

    #[snafu(display("Line {}: {} declares {} records, found {}", line, section, declared, found))]
    CountMismatch {
        line: usize,
        section: &'static str,
        declared: usize,
        found: usize,
    },

    #[snafu(display("Line {}: missing header field '{}'", line, field))]
    MissingHeader { line: usize, field: &'static str },
}

impl ParseError {
    /// 1-based line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        use ParseError::*;
        match self {
            Io { .. } => None,
            UnknownHeader { line, .. }
            | UnknownSection { line, .. }
            | MalformedRecord { line, .. }
            | InvalidNumber { line, .. }
            | CountMismatch { line, .. }
            | MissingHeader { line, .. } => Some(*line),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Section {
    Header,
    Courses,
    Rooms,
    Curricula,
    Unavailability,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Courses => "COURSES",
            Section::Rooms => "ROOMS",
            Section::Curricula => "CURRICULA",
            Section::Unavailability => "UNAVAILABILITY_CONSTRAINTS",
        }
    }
}

#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    courses: Option<usize>,
    rooms: Option<usize>,
    days: Option<usize>,
    periods_per_day: Option<usize>,
    curricula: Option<usize>,
    constraints: Option<usize>,
}

fn number(line: usize, value: &str) -> Result<usize> {
    value.parse().context(InvalidNumberSnafu { line, value })
}

fn expect_fields(line: usize, section: Section, fields: &[&str], expected: usize) -> Result<()> {
    ensure!(
        fields.len() == expected,
        MalformedRecordSnafu {
            line,
            section: section.name(),
            reason: format!("expected {} fields, found {}", expected, fields.len()),
        }
    );
    Ok(())
}

struct Parser {
    header: Header,
    section: Section,
    // Line of every section header seen so far.
    section_lines: Vec<(Section, usize)>,
    courses: Vec<Course>,
    rooms: Vec<Room>,
    curricula: Vec<Curriculum>,
    unavailabilities: Vec<Unavailability>,
}

impl Parser {
    fn new() -> Self {
        Self {
            header: Header::default(),
            section: Section::Header,
            section_lines: Vec::new(),
            courses: Vec::new(),
            rooms: Vec::new(),
            curricula: Vec::new(),
            unavailabilities: Vec::new(),
        }
    }

    fn header_field(&mut self, line: usize, fields: &[&str]) -> Result<()> {
        let key = fields[0];
        let value = fields[1..].join(" ");
        let slot = match key {
            "Name:" => {
                self.header.name = Some(value);
                return Ok(());
            }
            "Courses:" => &mut self.header.courses,
            "Rooms:" => &mut self.header.rooms,
            "Days:" => &mut self.header.days,
            "Periods_per_day:" => &mut self.header.periods_per_day,
            "Curricula:" => &mut self.header.curricula,
            "Constraints:" => &mut self.header.constraints,
            _ => return UnknownHeaderSnafu { line, key }.fail(),
        };
        *slot = Some(number(line, &value)?);
        Ok(())
    }

    fn start_section(&mut self, line: usize, name: &str) -> Result<()> {
        let section = match name {
            "COURSES" => Section::Courses,
            "ROOMS" => Section::Rooms,
            "CURRICULA" => Section::Curricula,
            "UNAVAILABILITY_CONSTRAINTS" => Section::Unavailability,
            _ => return UnknownSectionSnafu { line, name }.fail(),
        };
        self.section = section;
        self.section_lines.push((section, line));
        Ok(())
    }

    fn record(&mut self, line: usize, fields: &[&str]) -> Result<()> {
        let section = self.section;
        match section {
            Section::Header => self.header_field(line, fields)?,
            Section::Courses => {
                expect_fields(line, section, fields, 5)?;
                self.courses.push(Course::new(
                    fields[0],
                    fields[1],
                    number(line, fields[2])?,
                    number(line, fields[3])?,
                    number(line, fields[4])?,
                ));
            }
            Section::Rooms => {
                expect_fields(line, section, fields, 2)?;
                self.rooms.push(Room::new(fields[0], number(line, fields[1])?));
            }
            Section::Curricula => {
                ensure!(
                    fields.len() >= 2,
                    MalformedRecordSnafu {
                        line,
                        section: section.name(),
                        reason: "expected an id and a member count",
                    }
                );
                let n = number(line, fields[1])?;
                let members = &fields[2..];
                ensure!(
                    members.len() == n,
                    MalformedRecordSnafu {
                        line,
                        section: section.name(),
                        reason: format!("declares {} members, lists {}", n, members.len()),
                    }
                );
                self.curricula
                    .push(Curriculum::new(fields[0], members.iter().copied()));
            }
            Section::Unavailability => {
                expect_fields(line, section, fields, 3)?;
                self.unavailabilities.push(Unavailability::new(
                    fields[0],
                    number(line, fields[1])?,
                    number(line, fields[2])?,
                ));
            }
        }
        Ok(())
    }

    fn section_line(&self, section: Section, last_line: usize) -> usize {
        self.section_lines
            .iter()
            .find(|(s, _)| *s == section)
            .map_or(last_line, |&(_, line)| line)
    }

    fn check_count(&self, section: Section, declared: usize, found: usize, last_line: usize) -> Result<()> {
        ensure!(
            declared == found,
            CountMismatchSnafu {
                line: self.section_line(section, last_line),
                section: section.name(),
                declared,
                found,
            }
        );
        Ok(())
    }

    fn finish(self, last_line: usize) -> Result<Instance> {
        let line = self.section_line(Section::Courses, last_line);
        let header = &self.header;
        let name = header.name.clone().context(MissingHeaderSnafu { line, field: "Name" })?;
        let num_courses = header.courses.context(MissingHeaderSnafu { line, field: "Courses" })?;
        let num_rooms = header.rooms.context(MissingHeaderSnafu { line, field: "Rooms" })?;
        let num_days = header.days.context(MissingHeaderSnafu { line, field: "Days" })?;
        let periods_per_day = header
            .periods_per_day
            .context(MissingHeaderSnafu { line, field: "Periods_per_day" })?;
        let num_curricula = header.curricula.context(MissingHeaderSnafu { line, field: "Curricula" })?;
        let num_constraints = header
            .constraints
            .context(MissingHeaderSnafu { line, field: "Constraints" })?;

        self.check_count(Section::Courses, num_courses, self.courses.len(), last_line)?;
        self.check_count(Section::Rooms, num_rooms, self.rooms.len(), last_line)?;
        self.check_count(Section::Curricula, num_curricula, self.curricula.len(), last_line)?;
        self.check_count(
            Section::Unavailability,
            num_constraints,
            self.unavailabilities.len(),
            last_line,
        )?;

        Ok(Instance {
            name,
            num_days,
            periods_per_day,
            courses: self.courses,
            rooms: self.rooms,
            curricula: self.curricula,
            unavailabilities: self.unavailabilities,
        })
    }
}

impl FromStr for Instance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new();
        let mut last_line = 0;
        for (index, raw) in s.lines().enumerate() {
            let line = index + 1;
            last_line = line;
            let fields: Vec<&str> = raw.split_whitespace().collect();
            match fields.as_slice() {
                [] => continue,
                ["END."] => break,
                [name] if name.ends_with(':') => parser.start_section(line, name.trim_end_matches(':'))?,
                _ => parser.record(line, &fields)?,
            }
        }
        parser.finish(last_line)
    }
}

impl Instance {
    pub fn from_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        debug!("Reading instance from '{}'", path.display());
        let text = fs::read_to_string(path).context(IoSnafu {
            path: path.display().to_string(),
        })?;
        text.parse()
    }
}
