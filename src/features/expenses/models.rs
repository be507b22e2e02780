use serde::{Deserialize, Deserializer, Serialize};

/// 経費ID（APIサーバーが採番する）
pub type ExpenseId = i64;

/// 経費データモデル（APIサーバーが所有するレコードのコピー）
///
/// APIサーバーは入力を検証しないため、表示用の項目は欠けていてもnullでも受け付ける。
/// 文字列項目は空文字列、金額はNoneとして扱い、1件の不正なレコードで一覧取得全体を失敗させない。
/// カテゴリと支払い方法も想定外の値をそのまま文字列で保持する。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_method: String,
}

/// nullをデフォルト値として読み込む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Expense {
    /// 一覧に表示する金額（金額がない場合は空文字列）
    pub fn display_amount(&self) -> String {
        self.amount.map(format_amount).unwrap_or_default()
    }
}

/// 経費作成・更新用DTO（POSTとPUTで同じ形）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub date: String,
    pub payment_method: String,
}

/// 経費カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Travel,
    Bills,
    Shopping,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Travel,
        Category::Bills,
        Category::Shopping,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

/// 支払い方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Online];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Online => "Online",
        }
    }
}

/// 入力中の経費フォームの状態
///
/// 5つの項目をすべて文字列で保持する。金額は送信時に数値へ変換する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    pub payment_method: String,
}

impl ExpenseDraft {
    /// 既存の経費をフォームにコピーする
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            category: expense.category.clone(),
            amount: expense.display_amount(),
            date: expense.date.clone(),
            payment_method: expense.payment_method.clone(),
        }
    }

    /// すべての項目が空かどうか
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 送信用DTOに変換する（金額はここで初めて数値になる）
    pub fn to_dto(&self) -> ExpenseDto {
        ExpenseDto {
            title: self.title.clone(),
            category: self.category.clone(),
            amount: coerce_amount(&self.amount),
            date: self.date.clone(),
            payment_method: self.payment_method.clone(),
        }
    }
}

/// 入力された金額文字列を数値に変換する
///
/// 前後の空白は無視し、空文字列は0、解析できない文字列はNaNになる。
/// 範囲や符号の検証は行わない。
pub fn coerce_amount(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// 金額を表示用の文字列にする（4.5 -> "4.5", 1000.0 -> "1000"）
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        "NaN".to_string()
    } else if amount == f64::INFINITY {
        "Infinity".to_string()
    } else if amount == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if amount == 0.0 {
        // -0も"0"として表示
        "0".to_string()
    } else {
        amount.to_string()
    }
}
