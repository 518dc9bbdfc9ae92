//! Text rendering of a [`Report`].

use std::fmt::Write;

use croupier_types::AggregateStats;

use crate::Report;

/// One of the four per-cell statistics printed after a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statistic {
    MeanMoney,
    MeanLossMoney,
    MeanRounds,
    WinPercentage,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::MeanMoney,
        Statistic::MeanLossMoney,
        Statistic::MeanRounds,
        Statistic::WinPercentage,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Statistic::MeanMoney => "Mean money",
            Statistic::MeanLossMoney => "Mean money after a loss",
            Statistic::MeanRounds => "Mean rounds",
            Statistic::WinPercentage => "Win percentage",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Statistic::MeanMoney | Statistic::MeanLossMoney => "€",
            Statistic::MeanRounds => "",
            Statistic::WinPercentage => "%",
        }
    }

    /// `None` when the statistic is undefined for the cell.
    pub fn value(&self, stats: &AggregateStats) -> Option<f64> {
        match self {
            Statistic::MeanMoney => Some(stats.mean_ending_money),
            Statistic::MeanLossMoney => stats.mean_loss_money,
            Statistic::MeanRounds => Some(stats.mean_round_count),
            Statistic::WinPercentage => Some(stats.win_percentage),
        }
    }

    fn format(&self, stats: Option<&AggregateStats>) -> String {
        match stats.and_then(|stats| self.value(stats)) {
            Some(value) => format!("{value:.2}{}", self.unit()),
            None => "-".to_string(),
        }
    }
}

/// Render `statistic` as a table: one row per strategy, one column per
/// objective.
pub fn render_table(report: &Report, statistic: Statistic) -> String {
    let header: Vec<String> = std::iter::once("Strategy".to_string())
        .chain(report.objectives.iter().map(|objective| format!("x{objective}")))
        .collect();
    let rows: Vec<Vec<String>> = report
        .strategies
        .iter()
        .map(|&strategy| {
            std::iter::once(strategy.to_string())
                .chain(
                    report
                        .objectives
                        .iter()
                        .map(|&objective| statistic.format(report.get(strategy, objective))),
                )
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (initial money {:.2}€, {} trials)",
        statistic.title(),
        report.initial_money,
        report.trials
    );
    for (index, row) in std::iter::once(&header).chain(&rows).enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(column, (cell, &width))| {
                let pad = width - cell.chars().count();
                if column == 0 {
                    format!("{cell}{}", " ".repeat(pad))
                } else {
                    format!("{}{cell}", " ".repeat(pad))
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
        if index == 0 {
            let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
            let _ = writeln!(out, "{}", rule.join("-+-"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportRow;
    use croupier_types::Strategy;

    fn stats(mean_loss_money: Option<f64>, win_percentage: f64) -> AggregateStats {
        AggregateStats {
            trials: 10,
            losses: if mean_loss_money.is_some() { 5 } else { 0 },
            mean_ending_money: 101.234,
            mean_loss_money,
            mean_round_count: 7.0,
            win_percentage,
        }
    }

    fn report() -> Report {
        Report {
            initial_money: 100.0,
            trials: 10,
            seed: 1,
            objectives: vec![1.05, 2.0],
            strategies: vec![Strategy::Martingale, Strategy::JamesBond],
            rows: vec![
                ReportRow {
                    strategy: Strategy::Martingale,
                    objective: 1.05,
                    stats: stats(None, 100.0),
                },
                ReportRow {
                    strategy: Strategy::Martingale,
                    objective: 2.0,
                    stats: stats(Some(12.5), 50.0),
                },
                ReportRow {
                    strategy: Strategy::JamesBond,
                    objective: 1.05,
                    stats: stats(Some(3.0), 50.0),
                },
                ReportRow {
                    strategy: Strategy::JamesBond,
                    objective: 2.0,
                    stats: stats(Some(0.0), 50.0),
                },
            ],
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(Statistic::MeanMoney.unit(), "€");
        assert_eq!(Statistic::MeanRounds.unit(), "");
        assert_eq!(Statistic::WinPercentage.unit(), "%");
    }

    #[test]
    fn test_money_table() {
        let table = render_table(&report(), Statistic::MeanMoney);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Mean money (initial money 100.00€, 10 trials)");
        assert!(lines[1].starts_with("Strategy"));
        assert!(lines[1].contains("x1.05"));
        assert!(lines[1].contains("x2"));
        assert!(lines[3].starts_with("Martingale"));
        assert!(lines[3].contains("101.23€"));
        assert!(lines[4].starts_with("James Bond"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_undefined_loss_mean_prints_dash() {
        let table = render_table(&report(), Statistic::MeanLossMoney);
        let martingale = table
            .lines()
            .find(|line| line.starts_with("Martingale"))
            .unwrap();
        let cells: Vec<&str> = martingale.split('|').map(str::trim).collect();
        assert_eq!(cells, vec!["Martingale", "-", "12.50€"]);
    }

    #[test]
    fn test_percentage_and_rounds() {
        let table = render_table(&report(), Statistic::WinPercentage);
        assert!(table.contains("100.00%"));
        assert!(table.contains("50.00%"));

        let table = render_table(&report(), Statistic::MeanRounds);
        assert!(table.contains("7.00"));
        assert!(!table.contains("7.00€"));
    }

    #[test]
    fn test_missing_cell_prints_dash() {
        let mut report = report();
        report.rows.pop();
        let table = render_table(&report, Statistic::MeanMoney);
        let bond = table.lines().find(|line| line.starts_with("James Bond")).unwrap();
        assert!(bond.trim_end().ends_with('-'));
    }
}
