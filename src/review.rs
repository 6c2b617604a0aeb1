//! 照合結果の対話式確認モジュール
//!
//! 在庫登録前に、照合結果を1件ずつ確認・修正する。

use crate::error::Result;
use dialoguer::{Input, Select};
use fridge_buddy_common::{AmountWithUnit, Catalog, FridgeItem, Unit};

/// 確認時の操作
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAction {
    /// そのまま登録
    Keep,
    /// 登録しない
    Remove,
    /// 別の食品に付け替え（表示名で指定）
    Reassign(String),
    /// 数量を変更
    SetAmount(f64),
    /// 単位を変更（比較可能な単位なら数量を換算）
    SetUnit(Unit),
    /// 残りはそのまま登録して終了
    Finish,
}

/// 操作を適用する
///
/// # Returns
/// 適用できたかどうか。存在しない食品名への付け替えや範囲外の番号は適用しない。
pub fn apply_action(
    items: &mut Vec<FridgeItem>,
    index: usize,
    action: &ReviewAction,
    catalog: &Catalog,
) -> bool {
    if index >= items.len() {
        return false;
    }

    match action {
        ReviewAction::Keep | ReviewAction::Finish => true,
        ReviewAction::Remove => {
            items.remove(index);
            true
        }
        ReviewAction::Reassign(name) => match catalog.find_by_display_name(name) {
            Some(entry) => {
                items[index].reassign(entry);
                true
            }
            None => false,
        },
        ReviewAction::SetAmount(amount) => {
            if !amount.is_finite() || *amount < 0.0 {
                return false;
            }
            items[index].amount = *amount;
            true
        }
        ReviewAction::SetUnit(unit) => {
            // g⇔kg, ml⇔l は数量も換算する
            let item = &mut items[index];
            if let Some(amount) = AmountWithUnit::new(item.amount, item.unit).amount_in(*unit) {
                item.amount = amount;
            }
            item.unit = *unit;
            true
        }
    }
}

/// 対話式で照合結果を確認する
pub fn run_interactive_review(items: Vec<FridgeItem>, catalog: &Catalog) -> Result<Vec<FridgeItem>> {
    let mut items = items;

    if items.is_empty() {
        println!("確認する食品がありません");
        return Ok(items);
    }

    println!("🔎 照合結果の確認: {}件", items.len());
    println!("---\n");

    let total = items.len();
    let mut index = 0;
    let mut count = 0;

    while index < items.len() {
        count += 1;
        let item = &items[index];
        println!(
            "[{}/{}] {} {}{} ({})",
            count, total, item.name, item.amount, item.unit, item.grocery_type
        );

        let action = prompt_action(catalog)?;
        if !apply_action(&mut items, index, &action, catalog) {
            println!("  → 変更できませんでした\n");
            count -= 1;
            continue;
        }

        match action {
            ReviewAction::Remove => {
                println!("  → 削除\n");
                continue;
            }
            ReviewAction::Finish => {
                println!("  → 残りをそのまま登録\n");
                break;
            }
            ReviewAction::Keep => println!("  → OK\n"),
            _ => {
                let item = &items[index];
                println!("  → {} {}{}\n", item.name, item.amount, item.unit);
                // 変更後にもう一度確認する
                count -= 1;
                continue;
            }
        }

        index += 1;
    }

    println!("✔ 確認完了: {}件を登録", items.len());
    Ok(items)
}

/// 操作を選ぶ
fn prompt_action(catalog: &Catalog) -> Result<ReviewAction> {
    let choices = [
        "そのまま登録",
        "削除",
        "食品を変更",
        "数量を変更",
        "単位を変更",
        "残りはそのまま登録",
    ];

    let selection = Select::new()
        .with_prompt("操作")
        .items(&choices)
        .default(0)
        .interact()?;

    let action = match selection {
        0 => ReviewAction::Keep,
        1 => ReviewAction::Remove,
        2 => {
            let entries = catalog.entries_sorted();
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            let picked = Select::new()
                .with_prompt("食品")
                .items(&names)
                .default(0)
                .max_length(15)
                .interact()?;
            ReviewAction::Reassign(names[picked].to_string())
        }
        3 => {
            let amount: f64 = Input::new().with_prompt("数量").interact_text()?;
            ReviewAction::SetAmount(amount)
        }
        4 => {
            let units: Vec<&str> = Unit::ALL.iter().map(|u| u.as_str()).collect();
            let picked = Select::new()
                .with_prompt("単位")
                .items(&units)
                .default(0)
                .interact()?;
            ReviewAction::SetUnit(Unit::ALL[picked])
        }
        _ => ReviewAction::Finish,
    };

    Ok(action)
}
