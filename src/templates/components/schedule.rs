use crate::domain::DAYS_OF_WEEK;
use maud::{html, Markup};

/// Read-only Sunday-first day cells.
pub fn schedule_cells(days: &[bool; 7]) -> Markup {
    html! {
        div class="days-grid" {
            @for (day, on) in DAYS_OF_WEEK.iter().zip(days) {
                div.day-cell.active[*on] { (day) }
            }
        }
    }
}

/// One checkbox per day, submitted as repeated `day=<index>` pairs.
pub fn day_checkboxes(days: &[bool; 7]) -> Markup {
    html! {
        div class="days-selector" {
            @for (i, day) in DAYS_OF_WEEK.iter().enumerate() {
                label class="day-btn" {
                    input type="checkbox" name="day" value=(i) checked[days[i]];
                    (day)
                }
            }
        }
    }
}
