//! Integration tests for prompt lookup, upsert and delete.

use sqlx::PgPool;
use medidoc_db::models::prompt::{PromptKey, UpsertPrompt};
use medidoc_db::repositories::{EvaluationPromptRepo, PromptRepo};
use medidoc_db::SeedConfig;

async fn seeded(pool: &PgPool) {
    medidoc_db::bootstrap::seed_defaults(pool, &SeedConfig::default())
        .await
        .unwrap();
}

fn upsert(department: &str, doctor: &str, content: &str, model: Option<&str>) -> UpsertPrompt {
    UpsertPrompt {
        department: department.into(),
        document_type: "主治医意見書".into(),
        doctor: doctor.into(),
        content: content.into(),
        selected_model: model.map(str::to_string),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_inserts_then_updates(pool: PgPool) {
    seeded(&pool).await;

    let (first, created) = PromptRepo::upsert(&pool, &upsert("内科", "田中", "v1", None))
        .await
        .unwrap();
    assert!(created);
    assert_eq!(first.content, "v1");

    let (second, created) = PromptRepo::upsert(&pool, &upsert("内科", "田中", "v2", Some("Claude")))
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.content, "v2");
    assert_eq!(second.selected_model.as_deref(), Some("Claude"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_effective_prompt_falls_back_to_default(pool: PgPool) {
    seeded(&pool).await;

    let key = PromptKey::new("内科", "主治医意見書", "誰か");
    let effective = PromptRepo::effective(&pool, &key).await.unwrap().unwrap();
    assert!(effective.is_default);

    PromptRepo::upsert(&pool, &upsert("内科", "誰か", "専用", None))
        .await
        .unwrap();
    let effective = PromptRepo::effective(&pool, &key).await.unwrap().unwrap();
    assert_eq!(effective.content, "専用");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_default_prompt_is_never_deleted(pool: PgPool) {
    seeded(&pool).await;

    let key = PromptKey::new("default", "主治医意見書", "default");
    assert!(!PromptRepo::delete(&pool, &key).await.unwrap());
    assert!(PromptRepo::find_default(&pool).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_prompt(pool: PgPool) {
    seeded(&pool).await;

    let key = PromptKey::new("内科", "主治医意見書", "default");
    assert!(PromptRepo::delete(&pool, &key).await.unwrap());
    assert!(PromptRepo::find(&pool, &key).await.unwrap().is_none());
    assert!(!PromptRepo::delete(&pool, &key).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_evaluation_prompt_upsert(pool: PgPool) {
    assert!(EvaluationPromptRepo::find(&pool, "主治医意見書").await.unwrap().is_none());

    EvaluationPromptRepo::upsert(&pool, "主治医意見書", "評価1").await.unwrap();
    let saved = EvaluationPromptRepo::upsert(&pool, "主治医意見書", "評価2").await.unwrap();
    assert_eq!(saved.content, "評価2");

    let all = EvaluationPromptRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}
