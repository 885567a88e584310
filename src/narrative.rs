// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Narrative generation: render the financial summary into a prompt, send
//! it to a chat-completions endpoint, and scrape insights/recommendations
//! out of the free-text reply. The scraping is best effort by design — the
//! reply is unstructured model output, so an empty extraction is a valid
//! result and callers must render the report without it.

use crate::summary::FinancialSummary;
use crate::utils::{fmt_money, http_client};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

/// Bound on the external call; expiry is a normal failure path, not an
/// error the user should see as a crash.
pub const GENERATION_TIMEOUT_SECS: u64 = 30;

pub const API_KEY_ENV: &str = "BUDGETPRO_AI_KEY";
const MODEL_ENV: &str = "BUDGETPRO_AI_MODEL";
const DEFAULT_MODEL: &str = "sonar";

pub fn build_prompt(summary: &FinancialSummary) -> String {
    let categories = summary
        .category_breakdown
        .iter()
        .map(|c| {
            format!(
                "- {}: {} ({} transactions)",
                c.category,
                fmt_money(c.amount),
                c.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let budgets = summary
        .budget_analysis
        .iter()
        .map(|b| {
            format!(
                "- {}: {:.0}% used ({}/{})",
                b.category,
                b.percentage_used,
                fmt_money(b.spent),
                fmt_money(b.limit)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let trends = summary
        .spending_trends
        .iter()
        .map(|t| {
            format!(
                "{}: Income {}, Expenses {}, Savings {}",
                t.month,
                fmt_money(t.income),
                fmt_money(t.expenses),
                fmt_money(t.savings)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a professional financial advisor. Analyze the following personal finance data and provide detailed insights, recommendations, and actionable advice.\n\n\
         FINANCIAL DATA FOR {month} {year}:\n\n\
         Income: {income}\n\
         Expenses: {expenses}\n\
         Net Savings: {savings}\n\
         Savings Rate: {rate:.1}%\n\n\
         SPENDING BY CATEGORY:\n{categories}\n\n\
         BUDGET STATUS:\n{budgets}\n\n\
         3-MONTH SPENDING TREND:\n{trends}\n\n\
         Please provide:\n\
         1. Overall Financial Health Assessment (2-3 sentences)\n\
         2. Top 3 Spending Insights (identify patterns, concerns, or positive trends)\n\
         3. Budget Performance Analysis (which budgets are doing well/poorly)\n\
         4. 5 Specific Actionable Recommendations to improve financial health\n\
         5. Spending Optimization Tips (where to cut costs without major lifestyle changes)\n\
         6. Savings Goals Suggestions based on current income\n\n\
         Be specific, practical, and encouraging in your advice.",
        month = summary.month,
        year = summary.year,
        income = fmt_money(summary.overview.total_income),
        expenses = fmt_money(summary.overview.total_expenses),
        savings = fmt_money(summary.overview.net_savings),
        rate = summary.overview.savings_rate,
        categories = categories,
        budgets = budgets,
        trends = trends,
    )
}

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

/// Submits the prompt and returns the completion text. The provider only
/// has to speak the chat-completions shape; model and key come from the
/// environment so no credential ever lands in the database.
pub fn generate(endpoint: &str, api_key: &str, prompt: &str) -> Result<String> {
    let model =
        std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let client = http_client(GENERATION_TIMEOUT_SECS)?;
    let resp = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(&json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
        }))
        .send()
        .context("Narrative generation request failed")?
        .error_for_status()
        .context("Narrative generation service returned an error")?;
    let completion: Completion = resp
        .json()
        .context("Invalid response from narrative generation service")?;
    completion
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .context("Narrative generation service returned no choices")
}

static ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+\.|[-•])").unwrap());
static LEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*|^[-•]\s*").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());

fn clean_item(line: &str) -> String {
    let s = LEAD.replace(line.trim(), "");
    let s = BOLD.replace_all(&s, "$1");
    let s = ITALIC.replace_all(&s, "$1");
    s.trim().to_string()
}

/// Line-oriented scrape: a heading containing `heading_word` arms capture,
/// then every ordinal/bullet line is taken, minus the heading's own
/// restated label.
fn extract_items(text: &str, heading_word: &str, label_filter: &str, max: usize) -> Vec<String> {
    let mut items = Vec::new();
    let mut armed = false;
    for line in text.lines() {
        let lower = line.to_lowercase();
        if lower.contains(heading_word) {
            armed = true;
        }
        if armed && ITEM.is_match(line.trim()) {
            let cleaned = clean_item(line);
            if !cleaned.is_empty() && !cleaned.to_lowercase().contains(label_filter) {
                items.push(cleaned);
            }
        }
    }
    items.truncate(max);
    items
}

pub fn extract_recommendations(text: &str) -> Vec<String> {
    extract_items(text, "recommendation", "specific actionable", 5)
}

pub fn extract_insights(text: &str) -> Vec<String> {
    extract_items(text, "insight", "spending insights", 3)
}
