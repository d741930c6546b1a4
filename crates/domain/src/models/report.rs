//! Report assembly: register grids, totals and printable documents.
//!
//! Everything in this module is a pure projection of already-fetched rows.
//! Rendering and file output live behind `services::renderer`.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::attendance::{AttendanceStatus, TimeSlot};
use crate::models::context::Locale;
use crate::models::education::EducationReportResponse;
use crate::models::finance::{ExpenseResponse, IncomeResponse, LedgerFilter};

/// Days shown per printed register page.
pub const REGISTER_PAGE_SIZE: usize = 10;

/// One student's row in the monthly register.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRow {
    pub student_id: Uuid,
    pub student_name: String,
    /// One cell per day, aligned with the grid's day list.
    pub cells: Vec<Option<AttendanceStatus>>,
}

/// The monthly attendance register for one time slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterGrid {
    pub time_slot: TimeSlot,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<RegisterRow>,
}

/// Build the register grid: one row per student, one cell per day, at most
/// one record per cell. Records for other students or days are ignored.
pub fn build_register_grid(
    time_slot: TimeSlot,
    students: &[(Uuid, String)],
    days: &[NaiveDate],
    records: &[(Uuid, NaiveDate, AttendanceStatus)],
) -> RegisterGrid {
    let mut by_cell: HashMap<(Uuid, NaiveDate), AttendanceStatus> = HashMap::new();
    for (student_id, date, status) in records {
        by_cell.insert((*student_id, *date), *status);
    }

    let rows = students
        .iter()
        .map(|(student_id, name)| RegisterRow {
            student_id: *student_id,
            student_name: name.clone(),
            cells: days
                .iter()
                .map(|day| by_cell.get(&(*student_id, *day)).copied())
                .collect(),
        })
        .collect();

    RegisterGrid {
        time_slot,
        days: days.to_vec(),
        rows,
    }
}

/// Sum amounts in minor units. Commutative over ordering and over
/// filter-then-sum versus sum-then-subtract decompositions.
pub fn compute_total(amounts: &[i64]) -> i64 {
    amounts.iter().sum()
}

/// Split the day list into fixed-size chunks for print layout. The last
/// page may be short.
pub fn paginate_days(days: &[NaiveDate], page_size: usize) -> Vec<&[NaiveDate]> {
    if page_size == 0 {
        return Vec::new();
    }
    days.chunks(page_size).collect()
}

/// A fully assembled, renderer-agnostic document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportDocument {
    pub title: String,
    pub madrasa_name: String,
    pub date_range: String,
    pub filter_description: String,
    pub generated_at: DateTime<Utc>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals_row: Option<Vec<String>>,
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Assemble the income export document.
pub fn income_document(
    madrasa_name: &str,
    entries: &[IncomeResponse],
    filter: &LedgerFilter,
) -> ReportDocument {
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                format_date(entry.date),
                entry.donor_name.clone(),
                opt(&entry.donor_contact),
                entry.income_type.clone(),
                entry.frequency.clone(),
                entry.amount.to_string(),
                opt(&entry.receipt_number),
            ]
        })
        .collect();

    let total = compute_total(&entries.iter().map(|e| e.amount).collect::<Vec<_>>());

    ReportDocument {
        title: "Income Report".to_string(),
        madrasa_name: madrasa_name.to_string(),
        date_range: date_range_label(filter),
        filter_description: filter.describe(),
        generated_at: Utc::now(),
        columns: vec![
            "Date".to_string(),
            "Donor".to_string(),
            "Contact".to_string(),
            "Type".to_string(),
            "Frequency".to_string(),
            "Amount".to_string(),
            "Receipt".to_string(),
        ],
        rows,
        totals_row: Some(vec![
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            total.to_string(),
            String::new(),
        ]),
    }
}

/// Assemble the expense export document.
pub fn expense_document(
    madrasa_name: &str,
    entries: &[ExpenseResponse],
    filter: &LedgerFilter,
) -> ReportDocument {
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                format_date(entry.date),
                entry.expense_type.clone(),
                opt(&entry.category),
                entry.recipient_name.clone(),
                entry.amount.to_string(),
                opt(&entry.payment_method),
                opt(&entry.receipt_number),
            ]
        })
        .collect();

    let total = compute_total(&entries.iter().map(|e| e.amount).collect::<Vec<_>>());

    ReportDocument {
        title: "Expense Report".to_string(),
        madrasa_name: madrasa_name.to_string(),
        date_range: date_range_label(filter),
        filter_description: filter.describe(),
        generated_at: Utc::now(),
        columns: vec![
            "Date".to_string(),
            "Type".to_string(),
            "Category".to_string(),
            "Recipient".to_string(),
            "Amount".to_string(),
            "Payment Method".to_string(),
            "Receipt".to_string(),
        ],
        rows,
        totals_row: Some(vec![
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            total.to_string(),
            String::new(),
            String::new(),
        ]),
    }
}

/// Assemble the monthly attendance register document, one column per day.
/// The time-slot label in the header follows the requested locale.
pub fn attendance_register_document(
    madrasa_name: &str,
    grid: &RegisterGrid,
    locale: Locale,
) -> ReportDocument {
    let mut columns = vec!["Student".to_string()];
    columns.extend(grid.days.iter().map(|day| day.format("%d").to_string()));

    let rows = grid
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.student_name.clone()];
            cells.extend(
                row.cells
                    .iter()
                    .map(|status| AttendanceStatus::symbol_or_dash(*status).to_string()),
            );
            cells
        })
        .collect();

    let date_range = match (grid.days.first(), grid.days.last()) {
        (Some(first), Some(last)) => format!("{} - {}", format_date(*first), format_date(*last)),
        _ => String::new(),
    };

    let slot_label = match locale {
        Locale::Ur => grid.time_slot.label_ur(),
        Locale::En => grid.time_slot.as_str(),
    };

    ReportDocument {
        title: "Attendance Register".to_string(),
        madrasa_name: madrasa_name.to_string(),
        date_range,
        filter_description: format!("Time slot: {}", slot_label),
        generated_at: Utc::now(),
        columns,
        rows,
        totals_row: None,
    }
}

/// Assemble the monthly education register document.
pub fn education_register_document(
    madrasa_name: &str,
    student_names: &HashMap<Uuid, String>,
    entries: &[EducationReportResponse],
) -> ReportDocument {
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                format_date(entry.date),
                student_names
                    .get(&entry.student_id)
                    .cloned()
                    .unwrap_or_default(),
                entry
                    .sabak_para_no
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
                match entry.sabqi_recited {
                    Some(true) => "yes".to_string(),
                    Some(false) => "no".to_string(),
                    None => String::new(),
                },
                opt(&entry.sabqi_amount),
                entry
                    .manzil_number
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let date_range = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => {
            format!("{} - {}", format_date(first.date), format_date(last.date))
        }
        _ => String::new(),
    };

    ReportDocument {
        title: "Education Register".to_string(),
        madrasa_name: madrasa_name.to_string(),
        date_range,
        filter_description: String::new(),
        generated_at: Utc::now(),
        columns: vec![
            "Date".to_string(),
            "Student".to_string(),
            "Sabak Para".to_string(),
            "Sabqi Recited".to_string(),
            "Sabqi Amount".to_string(),
            "Manzil".to_string(),
        ],
        rows,
        totals_row: None,
    }
}

fn date_range_label(filter: &LedgerFilter) -> String {
    match (filter.date_from, filter.date_to) {
        (Some(from), Some(to)) => format!("{} - {}", format_date(from), format_date(to)),
        (Some(from), None) => format!("From {}", format_date(from)),
        (None, Some(to)) => format!("Until {}", format_date(to)),
        (None, None) => "All dates".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn month_days(n: u32) -> Vec<NaiveDate> {
        (1..=n).map(day).collect()
    }

    #[test]
    fn totals_are_order_invariant() {
        let amounts = [1000, 2500, 500];
        assert_eq!(compute_total(&amounts), 4000);

        let reordered = [500, 1000, 2500];
        assert_eq!(compute_total(&reordered), compute_total(&amounts));
    }

    #[test]
    fn filter_then_sum_matches_sum_then_subtract() {
        let all = [1000i64, 2500, 500, 300];
        let keep = |a: &i64| *a >= 500;

        let filtered: Vec<i64> = all.iter().copied().filter(|a| keep(a)).collect();
        let excluded: Vec<i64> = all.iter().copied().filter(|a| !keep(a)).collect();

        assert_eq!(
            compute_total(&filtered),
            compute_total(&all) - compute_total(&excluded)
        );
    }

    #[test]
    fn thirty_one_days_paginate_into_four_pages() {
        let days = month_days(31);
        let pages = paginate_days(&days, REGISTER_PAGE_SIZE);
        assert_eq!(pages.len(), 4);
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[1].len(), 10);
        assert_eq!(pages[2].len(), 10);
        assert_eq!(pages[3].len(), 1);
    }

    #[test]
    fn exact_multiple_has_no_short_page() {
        let days = month_days(30);
        let pages = paginate_days(&days, REGISTER_PAGE_SIZE);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|page| page.len() == 10));
    }

    #[test]
    fn zero_page_size_yields_no_pages() {
        let days = month_days(5);
        assert!(paginate_days(&days, 0).is_empty());
    }

    #[test]
    fn register_grid_places_each_record_in_its_cell() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let students = vec![(a, "Ahmed".to_string()), (b, "Bilal".to_string())];
        let days = month_days(3);
        let records = vec![
            (a, day(1), AttendanceStatus::Present),
            (a, day(3), AttendanceStatus::Late),
            (b, day(2), AttendanceStatus::Absent),
        ];

        let grid = build_register_grid(TimeSlot::Morning, &students, &days, &records);

        assert_eq!(grid.rows.len(), 2);
        assert_eq!(
            grid.rows[0].cells,
            vec![
                Some(AttendanceStatus::Present),
                None,
                Some(AttendanceStatus::Late)
            ]
        );
        assert_eq!(
            grid.rows[1].cells,
            vec![None, Some(AttendanceStatus::Absent), None]
        );
    }

    #[test]
    fn register_grid_ignores_out_of_range_records() {
        let a = Uuid::new_v4();
        let students = vec![(a, "Ahmed".to_string())];
        let days = month_days(2);
        let records = vec![
            (a, day(15), AttendanceStatus::Present),
            (Uuid::new_v4(), day(1), AttendanceStatus::Present),
        ];

        let grid = build_register_grid(TimeSlot::Evening, &students, &days, &records);
        assert_eq!(grid.rows[0].cells, vec![None, None]);
    }

    #[test]
    fn register_document_renders_symbols_and_dashes() {
        let a = Uuid::new_v4();
        let students = vec![(a, "Ahmed".to_string())];
        let days = month_days(2);
        let records = vec![(a, day(1), AttendanceStatus::Present)];
        let grid = build_register_grid(TimeSlot::Morning, &students, &days, &records);

        let document = attendance_register_document("Darul Uloom", &grid, Locale::En);
        assert_eq!(document.columns.len(), 3);
        assert_eq!(document.rows[0], vec!["Ahmed", "✓", "–"]);
        assert_eq!(document.date_range, "01/03/2024 - 02/03/2024");
        assert_eq!(document.filter_description, "Time slot: morning");
    }

    #[test]
    fn register_header_uses_urdu_slot_label_by_default() {
        let grid = build_register_grid(TimeSlot::Morning, &[], &month_days(1), &[]);
        let document = attendance_register_document("Darul Uloom", &grid, Locale::default());
        assert_eq!(
            document.filter_description,
            format!("Time slot: {}", TimeSlot::Morning.label_ur())
        );
    }

    #[test]
    fn income_document_carries_totals_row() {
        let entries = vec![
            income_entry(1000, day(1)),
            income_entry(2500, day(2)),
            income_entry(500, day(3)),
        ];
        let document = income_document("Darul Uloom", &entries, &LedgerFilter::default());

        assert_eq!(document.rows.len(), 3);
        let totals = document.totals_row.unwrap();
        assert_eq!(totals[0], "Total");
        assert_eq!(totals[5], "4000");
    }

    #[test]
    fn empty_income_document_totals_zero() {
        let document = income_document("Darul Uloom", &[], &LedgerFilter::default());
        assert!(document.rows.is_empty());
        assert_eq!(document.totals_row.unwrap()[5], "0");
    }

    fn income_entry(amount: i64, date: NaiveDate) -> IncomeResponse {
        IncomeResponse {
            id: Uuid::new_v4(),
            donor_name: "Donor".to_string(),
            donor_contact: None,
            amount,
            income_type: "donation".to_string(),
            frequency: "one_time".to_string(),
            date,
            receipt_number: None,
            notes: None,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }
}
