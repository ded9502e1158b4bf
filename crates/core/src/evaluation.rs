//! Built-in evaluation prompts, offered until a document type has its own.

const OPINION_LETTER_EVALUATION: &str = "\
以下の主治医意見書の出力を評価してください。

評価基準:
1. 正確性: 入力情報が正確に反映されているか
2. 完全性: 必要な情報が漏れなく含まれているか
3. 一貫性: 前回の記載との一貫性があるか
4. 文書構造: 適切なセクション分けがされているか
5. 専門性: 医療文書として適切な表現が使用されているか

各評価基準について5段階で評価し、改善点があれば具体的に指摘してください。
";

const NURSING_INSTRUCTION_EVALUATION: &str = "\
以下の訪問看護指示書の出力を評価してください。

評価基準:
1. 正確性: 入力情報が正確に反映されているか
2. 完全性: 訪問看護に必要な指示内容が網羅されているか
3. 一貫性: 前回の記載との一貫性があるか
4. 指示内容の明確性: 看護師が実施すべき内容が明確に記載されているか
5. 専門性: 医療文書として適切な表現が使用されているか

各評価基準について5段階で評価し、改善点があれば具体的に指摘してください。
";

/// Default evaluation prompt for a document type, if one ships with the app.
pub fn default_evaluation_prompt(document_type: &str) -> Option<&'static str> {
    match document_type {
        "主治医意見書" => Some(OPINION_LETTER_EVALUATION),
        "訪問看護指示書" => Some(NURSING_INSTRUCTION_EVALUATION),
        _ => None,
    }
}
