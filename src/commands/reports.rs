// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::narrative;
use crate::reconcile;
use crate::store;
use crate::summary::{self, budget_flag, FinancialSummary};
use crate::utils::{fmt_money, get_ai_endpoint, maybe_print_json, pretty_table, require_active_user};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary_cmd(conn, sub)?,
        Some(("ai", sub)) => ai(conn, sub)?,
        Some(("export", sub)) => export(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn build_summary(conn: &Connection) -> Result<FinancialSummary> {
    let user_id = require_active_user(conn)?;
    let transactions = store::list_transactions(conn, user_id)?;
    let budgets = reconcile::recompute_spent(&transactions, &store::list_budgets(conn, user_id)?);
    summary::summarize(&transactions, &budgets, Utc::now().date_naive())
}

fn print_summary(s: &FinancialSummary) {
    println!("Financial summary — {} {}", s.month, s.year);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Net Savings", "Savings Rate"],
            vec![vec![
                fmt_money(s.overview.total_income),
                fmt_money(s.overview.total_expenses),
                fmt_money(s.overview.net_savings),
                format!("{:.1}%", s.overview.savings_rate),
            ]],
        )
    );

    if !s.category_breakdown.is_empty() {
        let rows = s
            .category_breakdown
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(c.amount),
                    c.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Transactions"], rows));
    }

    if !s.budget_analysis.is_empty() {
        let rows = s
            .budget_analysis
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    format!("{}/{}", fmt_money(b.spent), fmt_money(b.limit)),
                    format!("{:.0}%", b.percentage_used),
                    fmt_money(b.remaining),
                    budget_flag(b.percentage_used).to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Spent/Limit", "Used", "Remaining", "Status"], rows)
        );
    }

    let rows = s
        .spending_trends
        .iter()
        .map(|t| {
            vec![
                t.month.clone(),
                fmt_money(t.income),
                fmt_money(t.expenses),
                fmt_money(t.savings),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Savings"], rows)
    );
}

fn summary_cmd(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let s = build_summary(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        print_summary(&s);
    }
    Ok(())
}

/// Fetches the narrative for a summary, or explains why there is none.
/// Every failure here is a fallback path: the caller still has the full
/// summary to show.
fn fetch_analysis(conn: &Connection, s: &FinancialSummary) -> Result<String> {
    let api_key = std::env::var(narrative::API_KEY_ENV)
        .with_context(|| format!("{} is not set", narrative::API_KEY_ENV))?;
    let endpoint = get_ai_endpoint(conn)?;
    let prompt = narrative::build_prompt(s);
    narrative::generate(&endpoint, &api_key, &prompt)
}

fn ai(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let s = build_summary(conn)?;

    let analysis = match fetch_analysis(conn, &s) {
        Ok(text) => Some(text),
        Err(err) => {
            eprintln!("Narrative generation unavailable ({:#}); showing basic report.", err);
            None
        }
    };
    let insights = analysis
        .as_deref()
        .map(narrative::extract_insights)
        .unwrap_or_default();
    let recommendations = analysis
        .as_deref()
        .map(narrative::extract_recommendations)
        .unwrap_or_default();

    if json_flag || jsonl_flag {
        let payload = json!({
            "summary": s,
            "analysis": analysis,
            "insights": insights,
            "recommendations": recommendations,
        });
        maybe_print_json(json_flag, jsonl_flag, &payload)?;
        return Ok(());
    }

    print_summary(&s);
    if !insights.is_empty() {
        println!("\nKey insights:");
        for i in &insights {
            println!("  ✓ {}", i);
        }
    }
    if !recommendations.is_empty() {
        println!("\nRecommendations:");
        for (n, r) in recommendations.iter().enumerate() {
            println!("  {}. {}", n + 1, r);
        }
    }
    if let Some(text) = &analysis {
        println!("\nFull analysis:\n{}", text);
    }
    Ok(())
}

/// Plain-text report, the downloadable artifact of the reports page.
pub fn render_text_report(s: &FinancialSummary, analysis: Option<&str>) -> String {
    let rule = "═".repeat(59);
    let mut out = String::new();
    out.push_str("BUDGETPRO FINANCIAL REPORT\n\n");
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("EXECUTIVE SUMMARY - {} {}\n", s.month, s.year));
    out.push_str(&format!("{}\n\n", rule));
    out.push_str(&format!(
        "Total Income:        {}\nTotal Expenses:      {}\nNet Savings:         {}\nSavings Rate:        {:.1}%\n\n",
        fmt_money(s.overview.total_income),
        fmt_money(s.overview.total_expenses),
        fmt_money(s.overview.net_savings),
        s.overview.savings_rate,
    ));

    out.push_str(&format!("{}\nSPENDING BREAKDOWN BY CATEGORY\n{}\n\n", rule, rule));
    let mut by_amount = s.category_breakdown.clone();
    by_amount.sort_by(|a, b| b.amount.cmp(&a.amount));
    for c in &by_amount {
        out.push_str(&format!(
            "{:<25} {:>12}  ({} transactions)\n",
            c.category,
            fmt_money(c.amount),
            c.count
        ));
    }

    out.push_str(&format!("\n{}\nBUDGET PERFORMANCE\n{}\n\n", rule, rule));
    for b in &s.budget_analysis {
        out.push_str(&format!(
            "{:<25} {:.0}% used\n    Spent: {} / {}\n    Remaining: {}\n    Status: {}\n\n",
            b.category,
            b.percentage_used,
            fmt_money(b.spent),
            fmt_money(b.limit),
            fmt_money(b.remaining),
            budget_flag(b.percentage_used),
        ));
    }

    out.push_str(&format!("{}\n3-MONTH SPENDING TRENDS\n{}\n\n", rule, rule));
    for t in &s.spending_trends {
        out.push_str(&format!(
            "{:<10} Income: {:>12}  Expenses: {:>12}  Savings: {:>12}\n",
            t.month,
            fmt_money(t.income),
            fmt_money(t.expenses),
            fmt_money(t.savings),
        ));
    }

    if let Some(text) = analysis {
        out.push_str(&format!("\n{}\nAI-POWERED FINANCIAL ANALYSIS\n{}\n\n", rule, rule));
        out.push_str(text);
        out.push('\n');
    }

    out.push_str(&format!("\n{}\nEND OF REPORT\n{}\n", rule, rule));
    out
}

fn export(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out_path = sub.get_one::<String>("out").unwrap();
    let s = build_summary(conn)?;
    let analysis = if sub.get_flag("ai") {
        match fetch_analysis(conn, &s) {
            Ok(text) => Some(text),
            Err(err) => {
                eprintln!(
                    "Narrative generation unavailable ({:#}); exporting without it.",
                    err
                );
                None
            }
        }
    } else {
        None
    };
    let report = render_text_report(&s, analysis.as_deref());
    std::fs::write(out_path, report)
        .with_context(|| format!("Write report to {}", out_path))?;
    println!("Exported report to {}", out_path);
    Ok(())
}
