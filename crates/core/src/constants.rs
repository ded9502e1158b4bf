//! Catalog defaults and user-facing messages.

// ---------------------------------------------------------------------------
// Selection defaults
// ---------------------------------------------------------------------------

/// Department key shared by every department ("全科共通" in the UI).
pub const DEFAULT_DEPARTMENT: &str = "default";

/// Doctor key shared by every doctor of a department ("医師共通" in the UI).
pub const DEFAULT_DOCTOR: &str = "default";

/// Document type of the system default prompt row.
pub const DEFAULT_DOCUMENT_TYPE: &str = "主治医意見書";

/// Document types provisioned on an empty database, in display order.
pub const DEFAULT_DOCUMENT_TYPES: &[&str] = &["主治医意見書", "訪問看護指示書"];

/// Departments provisioned on an empty database, in display order.
pub const DEFAULT_DEPARTMENTS: &[&str] = &["内科", "消化器内科", "整形外科", "眼科"];

/// `setting_id` of the row holding the last-used sidebar selection.
pub const USER_PREFERENCES_SETTING_ID: &str = "user_preferences";

/// Display label for the shared department.
pub const DEFAULT_DEPARTMENT_LABEL: &str = "全科共通";

// ---------------------------------------------------------------------------
// Summary sections
// ---------------------------------------------------------------------------

/// Canonical section headings, in output order.
pub const DEFAULT_SECTION_NAMES: &[&str] = &["治療経過", "特記事項", "備考"];

/// Alternate headings the models tend to emit, mapped to canonical names.
pub const DEFAULT_SECTION_ALIASES: &[(&str, &str)] = &[
    ("経過", "治療経過"),
    ("特記すべき事項", "特記事項"),
    ("その他", "備考"),
];

// ---------------------------------------------------------------------------
// Prompt text
// ---------------------------------------------------------------------------

/// Template used when no prompt row exists at all.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
あなたは経験豊富な医師です。以下のカルテ情報と追加情報をもとに、医療文書を作成してください。
出力は次の見出しで区切り、見出し以外の装飾記号は使用しないでください。
【治療経過】
【特記事項】
【備考】
カルテに記載のない事項は推測せず、記載しないでください。";

/// Initial content of the "additional info" box.
pub const DEFAULT_ADDITIONAL_INFO: &str = "【前回の記載】\n(ここに貼り付け)";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NO_API_CREDENTIALS: &str = "使用可能なAI APIの認証情報が設定されていません。環境変数を確認してください。";
pub const MSG_DEFAULT_PROMPT_PROTECTED: &str = "デフォルトプロンプトは削除できません";
pub const MSG_FIELD_REQUIRED: &str = "すべての項目を入力してください";
pub const MSG_DEPARTMENT_EXISTS: &str = "この診療科は既に存在します";
pub const MSG_DOCUMENT_TYPE_EXISTS: &str = "この文書種類は既に存在します";
pub const MSG_USAGE_SAVE_FAILED: &str = "統計情報の保存に失敗しました";
