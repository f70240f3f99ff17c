use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::reports::{MemberListRow, MemberSummaryRow};
use crate::error::AppError;
use crate::routes::members::resolve_member;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

pub async fn members_summary(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let rows = db::reports::members_summary(&state.pool).await?;

    match params.format.as_deref().unwrap_or("json") {
        "csv" => Ok(csv_response(summary_csv(&rows), "members_summary.csv")),
        _ => Ok(Json(rows).into_response()),
    }
}

pub async fn member_summary(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<String>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let member = resolve_member(&state.pool, &member_id).await?;
    let row = db::reports::member_summary(&state.pool, member.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No member found with that Member ID".to_string()))?;

    match params.format.as_deref().unwrap_or("json") {
        "csv" => {
            let filename = format!("{member_id}_summary.csv");
            Ok(csv_response(summary_csv(std::slice::from_ref(&row)), &filename))
        }
        _ => Ok(Json(row).into_response()),
    }
}

pub async fn members_list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let rows = db::reports::members_list(&state.pool).await?;

    match params.format.as_deref().unwrap_or("json") {
        "csv" => Ok(csv_response(members_csv(&rows), "members.csv")),
        _ => Ok(Json(rows).into_response()),
    }
}

fn csv_response(csv: String, filename: &str) -> axum::response::Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

fn summary_csv(rows: &[MemberSummaryRow]) -> String {
    use std::fmt::Write;
    let mut csv = String::new();
    let _ = writeln!(csv, "Name,Member ID,Scheme,Join Date,Charges Paid,Rewards Received");

    for row in rows {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{}",
            csv_escape(&row.name),
            csv_escape(&row.member_id),
            csv_escape(&row.scheme),
            row.joined_at.format("%Y-%m-%d"),
            row.charges_paid,
            row.rewards_received,
        );
    }

    csv
}

fn members_csv(rows: &[MemberListRow]) -> String {
    use std::fmt::Write;
    let mut csv = String::new();
    let _ = writeln!(csv, "Name,Member ID,Scheme,Email,Last Reward");

    for row in rows {
        let last_reward = row
            .last_reward
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "None".to_string());
        let _ = writeln!(
            csv,
            "{},{},{},{},{}",
            csv_escape(&row.name),
            csv_escape(&row.member_id),
            csv_escape(&row.scheme),
            csv_escape(&row.email),
            last_reward,
        );
    }

    csv
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn escape_passes_plain_strings_through() {
        assert_eq!(csv_escape("plain"), "plain");
    }

    #[test]
    fn escape_quotes_commas_and_quotes() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn summary_csv_with_no_members_is_header_only() {
        let csv = summary_csv(&[]);
        assert_eq!(
            csv,
            "Name,Member ID,Scheme,Join Date,Charges Paid,Rewards Received\n"
        );
    }

    #[test]
    fn summary_csv_formats_dates_and_counts() {
        let rows = vec![MemberSummaryRow {
            name: "Ada Lovelace".to_string(),
            member_id: "USR1A2B3C".to_string(),
            scheme: "Gold".to_string(),
            joined_at: Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap(),
            charges_paid: 4,
            rewards_received: 4,
        }];
        let csv = summary_csv(&rows);
        let mut lines = csv.lines();
        lines.next();
        assert_eq!(lines.next().unwrap(), "Ada Lovelace,USR1A2B3C,Gold,2025-01-15,4,4");
    }

    #[test]
    fn members_csv_renders_missing_last_reward_as_none() {
        let rows = vec![MemberListRow {
            name: "Ada Lovelace".to_string(),
            member_id: "USR1A2B3C".to_string(),
            scheme: String::new(),
            email: "ada@example.com".to_string(),
            last_reward: None,
        }];
        let csv = members_csv(&rows);
        assert!(csv.ends_with("Ada Lovelace,USR1A2B3C,,ada@example.com,None\n"));
    }

    #[test]
    fn members_csv_formats_last_reward_as_year_month() {
        let rows = vec![MemberListRow {
            name: "Ada".to_string(),
            member_id: "USRAAAAAA".to_string(),
            scheme: "Gold".to_string(),
            email: "ada@example.com".to_string(),
            last_reward: NaiveDate::from_ymd_opt(2025, 6, 1),
        }];
        let csv = members_csv(&rows);
        assert!(csv.contains(",2025-06\n"));
    }
}
