//! Substitute-teacher search for sessions of an unavailable teacher.
//!
//! A simplified sibling of the solvers' teacher-conflict check: every placed
//! session of the absent teacher is offered to the course's other qualified
//! teachers in the given order, and the first one without a session at the
//! same (day, time) takes it over.

use serde::Serialize;
use std::collections::HashMap;
use types::{Assignment, CourseId, TeacherId};

use crate::index::TeacherSchedule;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubstituteOutcome {
    Rescheduled {
        original: Assignment,
        substitute: TeacherId,
        replacement: Assignment,
    },
    NoSubstitute {
        original: Assignment,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstituteSummary {
    pub total: usize,
    pub rescheduled: usize,
    pub no_substitute: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SubstitutePlan {
    pub results: Vec<SubstituteOutcome>,
    pub summary: SubstituteSummary,
}

pub fn find_substitutes(
    timetable: &[Assignment],
    absent: &TeacherId,
    qualified: &HashMap<CourseId, Vec<TeacherId>>,
) -> SubstitutePlan {
    let mut schedule = TeacherSchedule::default();
    for a in timetable {
        if let Some((day, time, _)) = a.placement() {
            if &a.teacher != absent {
                schedule.assign(&a.teacher, day, time);
            }
        }
    }

    let mut plan = SubstitutePlan::default();
    for a in timetable.iter().filter(|a| &a.teacher == absent) {
        let Some((day, time, _)) = a.placement() else {
            continue;
        };
        plan.summary.total += 1;

        let pick = qualified
            .get(&a.course_id)
            .into_iter()
            .flatten()
            .filter(|t| *t != absent)
            .find(|t| !schedule.is_busy(t, day, time))
            .cloned();

        match pick {
            Some(sub) => {
                schedule.assign(&sub, day, time);
                let mut replacement = a.clone();
                replacement.teacher = sub.clone();
                plan.summary.rescheduled += 1;
                plan.results.push(SubstituteOutcome::Rescheduled {
                    original: a.clone(),
                    substitute: sub,
                    replacement,
                });
            }
            None => {
                plan.summary.no_substitute += 1;
                plan.results.push(SubstituteOutcome::NoSubstitute { original: a.clone() });
            }
        }
    }
    plan
}
