use crate::domain::models::time::{TimeOfDay, TimeWindow};

/// Generates every candidate slot for one day's operating window,
/// independent of what is already booked.
///
/// Walks from `day_start`, emitting `[current, current + duration)` while the
/// slot still fits before `day_end`. The cursor then advances by
/// `max(interval, duration) + buffer`: the interval is the walking step, but
/// a slot longer than the step pushes the next candidate past its own end
/// plus the buffer, so generated slots never overlap one another.
///
/// Pure and deterministic; a duration longer than the operating window
/// yields an empty list, not an error.
pub fn generate_slots(
    day_start: TimeOfDay,
    day_end: TimeOfDay,
    interval_min: u16,
    duration_min: u16,
    buffer_min: u16,
) -> Vec<TimeWindow> {
    let mut slots = Vec::new();
    if interval_min == 0 || duration_min == 0 {
        return slots;
    }

    // Widened so an oversized duration cannot overflow the walk.
    let end = u32::from(day_end.minutes());
    let duration = u32::from(duration_min);
    let step = u32::from(interval_min.max(duration_min)) + u32::from(buffer_min);
    let mut current = u32::from(day_start.minutes());

    while current + duration <= end {
        let start = TimeOfDay::from_minutes(current as u16);
        let slot_end = TimeOfDay::from_minutes((current + duration) as u16);
        match (start, slot_end) {
            (Some(start), Some(slot_end)) => slots.push(TimeWindow::new(start, slot_end)),
            _ => break,
        }
        current += step;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_standard_day_with_buffer() {
        // 08:00-20:00, 90 minute service, 30 minute interval, 15 minute buffer.
        let slots = generate_slots(t("08:00"), t("20:00"), 30, 90, 15);

        assert_eq!(slots[0], TimeWindow::new(t("08:00"), t("09:30")));
        assert_eq!(slots[1], TimeWindow::new(t("09:45"), t("11:15")));
        assert_eq!(slots[2], TimeWindow::new(t("11:30"), t("13:00")));

        for slot in &slots {
            assert_eq!(slot.duration_min(), 90);
            assert!(slot.end <= t("20:00"));
        }
        for pair in slots.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[1].start.minutes() - pair[0].start.minutes() >= 30 + 15);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn test_hourly_no_buffer() {
        let slots = generate_slots(t("09:00"), t("12:00"), 60, 60, 0);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], TimeWindow::new(t("09:00"), t("10:00")));
        assert_eq!(slots[2], TimeWindow::new(t("11:00"), t("12:00")));
    }

    #[test]
    fn test_interval_longer_than_duration() {
        // Short service on a coarse grid: spacing follows the interval.
        let slots = generate_slots(t("09:00"), t("12:00"), 60, 30, 0);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[1], TimeWindow::new(t("10:00"), t("10:30")));
    }

    #[test]
    fn test_duration_exceeding_window_is_empty() {
        let slots = generate_slots(t("09:00"), t("10:00"), 30, 120, 0);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_exact_fit_emits_single_slot() {
        let slots = generate_slots(t("09:00"), t("10:30"), 30, 90, 0);
        assert_eq!(slots, vec![TimeWindow::new(t("09:00"), t("10:30"))]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_slots(t("08:00"), t("20:00"), 30, 90, 15);
        let b = generate_slots(t("08:00"), t("20:00"), 30, 90, 15);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_interval_or_duration_is_empty() {
        assert!(generate_slots(t("08:00"), t("20:00"), 0, 60, 0).is_empty());
        assert!(generate_slots(t("08:00"), t("20:00"), 30, 0, 0).is_empty());
    }
}
