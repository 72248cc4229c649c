use app_schema::chat_log::ChatLog;
use chrono::TimeZone;
use std::fmt::Display;

pub const CSV_HEADER: &str = "Mensaje Usuario,Respuesta Bot,Entendida,Fecha";
pub const CSV_FILE_NAME: &str = "conversaciones.csv";

/// Wraps a field in double quotes, doubling any quote inside it.
pub fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One header line plus one record per log entry, in the given order.
/// Timestamps are stored in UTC and rendered in `tz`.
pub fn chat_logs_to_csv<Tz>(logs: &[ChatLog], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for log in logs {
        let date = tz
            .from_utc_datetime(&log.timestamp)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        out.push_str(&quote(&log.user_message));
        out.push(',');
        out.push_str(&quote(&log.bot_response));
        out.push(',');
        out.push_str(if log.understood { "Sí" } else { "No" });
        out.push(',');
        out.push_str(&quote(&date));
        out.push('\n');
    }
    out
}
