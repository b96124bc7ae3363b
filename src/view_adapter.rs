use serde_json::{json, Value};
use crate::trainer_engine::models::{ChartPoint, ResultsView, Side, TrainerSnapshot};

/// Fixed UI text.
pub const LABEL_CORRECT: &str = "Верно";
pub const LABEL_INCORRECT: &str = "Не верно";
pub const LABEL_ACCURACY: &str = "Точность";
pub const LABEL_GAME_OVER: &str = "Игра завершена!";
pub const LABEL_NO_DATA: &str = "Нет данных для отображения";

/// Series colors for the three chart lines.
const STROKE_ACCURACY: &str = "#3b82f6";
const STROKE_CORRECT: &str = "#10b981";
const STROKE_INCORRECT: &str = "#ef4444";

/// Build the central card: color class plus the `attempts/max` counter.
fn card(snapshot: &TrainerSnapshot) -> Value {
    let footer = if snapshot.completed { Value::from(LABEL_GAME_OVER) } else { Value::Null };
    json!({
        "color": snapshot.current_outcome.color_class(),
        "label": format!("{}/{}", snapshot.attempts, snapshot.max_attempts),
        "footer": footer,
    })
}

/// Build the counters block under the card.
fn counters(snapshot: &TrainerSnapshot) -> Value {
    json!([
        { "label": LABEL_CORRECT,   "value": snapshot.correct.to_string() },
        { "label": LABEL_INCORRECT, "value": snapshot.incorrect.to_string() },
        { "label": LABEL_ACCURACY,  "value": format!("{}%", snapshot.accuracy) },
    ])
}

/// Build one guess button; both are disabled once the session is over.
fn button(side: Side, snapshot: &TrainerSnapshot) -> Value {
    json!({
        "side": side,
        "active": snapshot.highlight == Some(side),
        "disabled": snapshot.attempts >= snapshot.max_attempts,
    })
}

/// Build the chart block: the two y-axes and the three lines over `series`.
fn chart(series: &[ChartPoint]) -> Value {
    if series.is_empty() {
        return json!({ "empty": true, "message": LABEL_NO_DATA });
    }
    json!({
        "empty": false,
        "x_axis": { "data_key": "date", "hidden": true },
        "y_axes": [
            { "id": "left",  "domain": [0, 100] },
            { "id": "right", "orientation": "right" },
        ],
        "lines": [
            { "axis": "left",  "data_key": "accuracy",  "stroke": STROKE_ACCURACY,  "name": format!("{LABEL_ACCURACY} (%)") },
            { "axis": "right", "data_key": "correct",   "stroke": STROKE_CORRECT,   "name": LABEL_CORRECT },
            { "axis": "right", "data_key": "incorrect", "stroke": STROKE_INCORRECT, "name": LABEL_INCORRECT },
        ],
        "data": series,
    })
}

/// Map a [`TrainerSnapshot`] to the JSON view model a web or desktop front end renders.
pub fn to_view_state(snapshot: &TrainerSnapshot) -> Value {
    let overlay = match snapshot.view {
        ResultsView::Hidden => Value::Null,
        ResultsView::Summary => json!({
            "kind": "summary",
            "correct": snapshot.correct,
            "incorrect": snapshot.incorrect,
            "accuracy": snapshot.accuracy,
            "attempts_setting": snapshot.attempts_setting,
        }),
        ResultsView::Statistics => json!({
            "kind": "statistics",
            "chart": chart(&snapshot.chart_series),
        }),
    };

    json!({
        "card": card(snapshot),
        "counters": counters(snapshot),
        "buttons": [button(Side::Blue, snapshot), button(Side::Red, snapshot)],
        "overlay": overlay,
    })
}
