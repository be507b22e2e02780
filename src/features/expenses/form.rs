/// 経費フォームの入力層
///
/// 必須項目・数値・日付・選択肢の制約はここで扱い、`ExpenseManager`の保存処理には持ち込まない。
/// 制約を満たさない場合は保存を試みずに入力欄の横にヒントを表示する。
use crate::features::expenses::models::{Category, ExpenseDraft, PaymentMethod};
use chrono::NaiveDate;

/// フォームの入力欄（表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Category,
    Amount,
    Date,
    PaymentMethod,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Category,
        FormField::Amount,
        FormField::Date,
        FormField::PaymentMethod,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Expense Title",
            FormField::Category => "Category",
            FormField::Amount => "Amount",
            FormField::Date => "Date",
            FormField::PaymentMethod => "Payment Method",
        }
    }

    /// 値が空のときに表示するプレースホルダー
    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Title => "",
            FormField::Category => "Select Category",
            FormField::Amount => "",
            FormField::Date => "YYYY-MM-DD",
            FormField::PaymentMethod => "Select Method",
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, FormField::Category | FormField::PaymentMethod)
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn value<'a>(&self, draft: &'a ExpenseDraft) -> &'a str {
        match self {
            FormField::Title => &draft.title,
            FormField::Category => &draft.category,
            FormField::Amount => &draft.amount,
            FormField::Date => &draft.date,
            FormField::PaymentMethod => &draft.payment_method,
        }
    }

    fn value_mut<'a>(&self, draft: &'a mut ExpenseDraft) -> &'a mut String {
        match self {
            FormField::Title => &mut draft.title,
            FormField::Category => &mut draft.category,
            FormField::Amount => &mut draft.amount,
            FormField::Date => &mut draft.date,
            FormField::PaymentMethod => &mut draft.payment_method,
        }
    }

    /// 選択肢（先頭は未選択を表す空文字列）
    pub fn options(&self) -> Vec<&'static str> {
        let mut options = vec![""];
        match self {
            FormField::Category => options.extend(Category::ALL.iter().map(Category::as_str)),
            FormField::PaymentMethod => {
                options.extend(PaymentMethod::ALL.iter().map(PaymentMethod::as_str))
            }
            _ => {}
        }
        options
    }

    /// 入力欄がその文字を受け付けるかどうか
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            FormField::Title | FormField::Date => !c.is_control(),
            FormField::Amount => c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'),
            FormField::Category | FormField::PaymentMethod => false,
        }
    }
}

/// 入力欄の制約違反
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Missing,
    NotANumber,
    InvalidDate,
}

impl FieldIssue {
    pub fn message(&self) -> &'static str {
        match self {
            FieldIssue::Missing => "Please fill out this field.",
            FieldIssue::NotANumber => "Please enter a number.",
            FieldIssue::InvalidDate => "Please enter a valid date.",
        }
    }
}

/// 文字を入力する。受け付けない文字の場合はfalse
pub fn push_char(draft: &mut ExpenseDraft, field: FormField, c: char) -> bool {
    if !field.accepts_char(c) {
        return false;
    }
    field.value_mut(draft).push(c);
    true
}

pub fn pop_char(draft: &mut ExpenseDraft, field: FormField) {
    if field.is_select() {
        field.value_mut(draft).clear();
    } else {
        field.value_mut(draft).pop();
    }
}

/// 選択欄の値を次（または前）の選択肢に切り替える
///
/// 現在の値が選択肢にない場合は未選択の位置から数える
pub fn cycle_select(draft: &mut ExpenseDraft, field: FormField, forward: bool) {
    if !field.is_select() {
        return;
    }

    let options = field.options();
    let current = options
        .iter()
        .position(|o| *o == field.value(draft))
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % options.len()
    } else {
        (current + options.len() - 1) % options.len()
    };

    *field.value_mut(draft) = options[next].to_string();
}

fn is_valid_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// 保存前に最初の制約違反を返す（違反がなければNone）
pub fn first_invalid_field(draft: &ExpenseDraft) -> Option<(FormField, FieldIssue)> {
    FormField::ALL.iter().find_map(|field| {
        let value = field.value(draft).trim();
        let issue = if value.is_empty() {
            Some(FieldIssue::Missing)
        } else {
            match field {
                FormField::Amount if value.parse::<f64>().map_or(true, |v| !v.is_finite()) => {
                    Some(FieldIssue::NotANumber)
                }
                FormField::Date if !is_valid_date(value) => Some(FieldIssue::InvalidDate),
                _ => None,
            }
        };
        issue.map(|issue| (*field, issue))
    })
}
