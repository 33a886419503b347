use types::TimeSlot;

/// Expands days × times into a flat slot sequence, days outer and times
/// inner, with ordinals counting up from zero.
pub fn build_time_slots<D, T>(days: &[D], times: &[T]) -> Vec<TimeSlot>
where
    D: AsRef<str>,
    T: AsRef<str>,
{
    let mut slots = Vec::with_capacity(days.len() * times.len());
    for day in days {
        for time in times {
            slots.push(TimeSlot {
                day: day.as_ref().to_string(),
                time: time.as_ref().to_string(),
                index: slots.len(),
            });
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_major_time_minor() {
        let slots = build_time_slots(&["Mon", "Tue"], &["09:00", "10:00", "11:00"]);
        let got: Vec<(&str, &str, usize)> = slots
            .iter()
            .map(|s| (s.day.as_str(), s.time.as_str(), s.index))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Mon", "09:00", 0),
                ("Mon", "10:00", 1),
                ("Mon", "11:00", 2),
                ("Tue", "09:00", 3),
                ("Tue", "10:00", 4),
                ("Tue", "11:00", 5),
            ]
        );
    }

    #[test]
    fn empty_inputs_yield_no_slots() {
        let none: [&str; 0] = [];
        assert!(build_time_slots(&none, &["09:00"]).is_empty());
        assert!(build_time_slots(&["Mon"], &none).is_empty());
    }
}
