//! Yandex Metrika tools: counters and goals of the management API, and
//! reports of the stat API.

pub mod counters;
pub mod goals;
pub mod reports;

fn counter_path(counter_id: i64) -> String {
    format!("/management/v1/counter/{counter_id}")
}
