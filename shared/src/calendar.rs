//! Month navigation and the month grid the dashboard calendar renders.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::currency::to_display;
use crate::models::{CalendarEvent, TransactionKind};

/// A calendar month, `month` in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    pub month: u32,
    pub year: i32,
}

impl MonthYear {
    /// Build a month, returning `None` when `month` is outside `1..=12`.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { month, year })
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    /// Parse the `MM/YYYY` label the dashboard header shows.
    pub fn parse(label: &str) -> Option<Self> {
        let (month, year) = label.trim().split_once('/')?;
        Self::new(month.trim().parse().ok()?, year.trim().parse().ok()?)
    }

    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Weekday of the first of the month, 0 = Sunday.
    pub fn first_weekday(&self) -> u32 {
        self.first_day()
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} de {}", self.month_name(), self.year)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Janeiro",
        2 => "Fevereiro",
        3 => "Março",
        4 => "Abril",
        5 => "Maio",
        6 => "Junho",
        7 => "Julho",
        8 => "Agosto",
        9 => "Setembro",
        10 => "Outubro",
        11 => "Novembro",
        12 => "Dezembro",
        _ => "Mês inválido",
    }
}

pub const WEEKDAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Parse a wire date (`YYYY-MM-DD`, optionally followed by a time part).
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let date = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// `DD/MM/YYYY`, or the input untouched when it is not a wire date.
pub fn format_date_br(value: &str) -> String {
    parse_wire_date(value)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// One event as shown inside a day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarChip {
    pub title: String,
    pub color: &'static str,
    pub date: NaiveDate,
}

impl CalendarChip {
    pub fn from_event(event: &CalendarEvent, date: NaiveDate) -> Self {
        Self {
            title: format!("{} - {}", event.descricao, to_display(event.valor)),
            color: event.tipo.color(),
            date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.color == TransactionKind::Receita.color()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCell {
    Padding,
    Day { day: u32, chips: Vec<CalendarChip> },
}

/// A Sunday-first month grid: leading padding, one cell per day, trailing
/// padding up to a whole number of weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    pub period: MonthYear,
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// Events dated outside `period` or with an unreadable date are skipped.
    pub fn build(period: MonthYear, events: &[CalendarEvent]) -> Self {
        let leading = period.first_weekday() as usize;
        let days = period.days_in_month();

        let mut cells = vec![CalendarCell::Padding; leading];
        cells.extend((1..=days).map(|day| CalendarCell::Day {
            day,
            chips: Vec::new(),
        }));

        for event in events {
            let Some(date) = parse_wire_date(&event.data) else {
                continue;
            };
            if !period.contains(date) {
                continue;
            }
            let index = leading + date.day0() as usize;
            if let Some(CalendarCell::Day { chips, .. }) = cells.get_mut(index) {
                chips.push(CalendarChip::from_event(event, date));
            }
        }

        let trailing = (7 - cells.len() % 7) % 7;
        cells.extend(std::iter::repeat(CalendarCell::Padding).take(trailing));

        Self { period, cells }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn chip_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| match cell {
                CalendarCell::Day { chips, .. } => chips.len(),
                CalendarCell::Padding => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(descricao: &str, valor: f64, data: &str, tipo: TransactionKind) -> CalendarEvent {
        CalendarEvent {
            descricao: descricao.to_string(),
            valor,
            data: data.to_string(),
            tipo,
        }
    }

    #[test]
    fn test_navigation_wraps_at_year_boundaries() {
        let january = MonthYear::new(1, 2024).unwrap();
        assert_eq!(january.previous(), MonthYear::new(12, 2023).unwrap());

        let december = MonthYear::new(12, 2024).unwrap();
        assert_eq!(december.next(), MonthYear::new(1, 2025).unwrap());

        let june = MonthYear::new(6, 2024).unwrap();
        assert_eq!(june.next().previous(), june);
    }

    #[test]
    fn test_label_round_trip_and_bad_labels() {
        let march = MonthYear::new(3, 2025).unwrap();
        assert_eq!(march.label(), "03/2025");
        assert_eq!(MonthYear::parse("03/2025"), Some(march));
        assert_eq!(MonthYear::parse(" 3 / 2025 "), Some(march));
        assert_eq!(MonthYear::parse("13/2025"), None);
        assert_eq!(MonthYear::parse("0/2025"), None);
        assert_eq!(MonthYear::parse("março"), None);
        assert_eq!(march.to_string(), "Março de 2025");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthYear::new(2, 2024).unwrap().days_in_month(), 29);
        assert_eq!(MonthYear::new(2, 2023).unwrap().days_in_month(), 28);
        assert_eq!(MonthYear::new(2, 1900).unwrap().days_in_month(), 28);
        assert_eq!(MonthYear::new(2, 2000).unwrap().days_in_month(), 29);
        assert_eq!(MonthYear::new(4, 2024).unwrap().days_in_month(), 30);
        assert_eq!(MonthYear::new(7, 2024).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_grid_padding_matches_first_weekday() {
        // September 2024 starts on a Sunday, February 2025 on a Saturday.
        let september = CalendarGrid::build(MonthYear::new(9, 2024).unwrap(), &[]);
        assert_eq!(september.cells.first(), Some(&CalendarCell::Day { day: 1, chips: vec![] }));

        let february = CalendarGrid::build(MonthYear::new(2, 2025).unwrap(), &[]);
        let leading = february
            .cells
            .iter()
            .take_while(|cell| **cell == CalendarCell::Padding)
            .count();
        assert_eq!(leading, 6);
        assert_eq!(february.cells.len() % 7, 0);
        assert!(february.weeks().all(|week| week.len() == 7));
    }

    #[test]
    fn test_grid_places_chips_on_their_day() {
        let events = vec![
            event("Salário", 5000.0, "2024-09-05", TransactionKind::Receita),
            event("Aluguel", 1234.5, "2024-09-05", TransactionKind::Despesa),
            event("Outro mês", 10.0, "2024-10-01", TransactionKind::Despesa),
            event("Sem data", 10.0, "ontem", TransactionKind::Despesa),
        ];
        let grid = CalendarGrid::build(MonthYear::new(9, 2024).unwrap(), &events);
        assert_eq!(grid.chip_count(), 2);

        match &grid.cells[4] {
            CalendarCell::Day { day, chips } => {
                assert_eq!(*day, 5);
                assert_eq!(chips[0].title, "Salário - R$ 5.000,00");
                assert_eq!(chips[0].color, "#28a745");
                assert!(chips[0].is_income());
                assert_eq!(chips[1].title, "Aluguel - R$ 1.234,50");
                assert_eq!(chips[1].color, "#dc3545");
            }
            other => panic!("expected day cell, got {:?}", other),
        }
    }

    #[test]
    fn test_date_formatting() {
        assert_eq!(format_date_br("2024-09-05"), "05/09/2024");
        assert_eq!(format_date_br("2024-09-05T10:00:00"), "05/09/2024");
        assert_eq!(format_date_br("sem data"), "sem data");
        assert_eq!(parse_wire_date("2024-02-30"), None);
    }
}
