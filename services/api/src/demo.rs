use crate::infra::{seed_sample_articles, InMemoryArticleRepository, OfflineSource};
use clap::Args;
use nurture::articles::{ArticleService, ArticleStatus};
use nurture::assessments::{score, AnswerSet, AssessmentCatalog};
use nurture::error::AppError;
use nurture::research::{ResearchAggregator, SearchOutcome};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Research question fed through the aggregation pipeline
    #[arg(long)]
    pub(crate) question: Option<String>,
    /// Skip the research pipeline portion of the demo
    #[arg(long)]
    pub(crate) skip_research: bool,
}

/// Offline walkthrough of the platform's three cores: assessment scoring,
/// the research pipeline (curated library only, no network), and the article
/// workflow. Prints human-readable output for stakeholder demos.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let question = args
        .question
        .unwrap_or_else(|| "How can I help my child with tantrums?".to_string());

    run_assessment_demo()?;

    if !args.skip_research {
        run_research_demo(&question).await;
    }

    run_article_demo();

    Ok(())
}

fn run_assessment_demo() -> Result<(), AppError> {
    println!("=== Assessment scoring ===");

    let catalog = AssessmentCatalog::standard();
    for definition in catalog.definitions() {
        // Answer every question with its middle option.
        let mut answers = AnswerSet::new();
        for question in &definition.questions {
            let value = question
                .options
                .get(question.options.len() / 2)
                .map(|option| option.value)
                .unwrap_or_default();
            answers.record(question.id.clone(), value);
        }

        let result = score(definition, &answers)?;
        println!(
            "{}: {} / {} -> {}",
            definition.title, result.total_score, result.max_possible_score, result.band.label
        );
        println!("  {}", result.band.description);
        if let Some(subscales) = result.subscales {
            println!(
                "  subscales: depression {}, anxiety {}, stress {}",
                subscales.depression, subscales.anxiety, subscales.stress
            );
        }
    }

    Ok(())
}

async fn run_research_demo(question: &str) {
    println!();
    println!("=== Research pipeline (offline, curated library only) ===");
    println!("question: {question}");

    let aggregator = ResearchAggregator::new(Arc::new(OfflineSource), Arc::new(OfflineSource));

    match aggregator.search(question).await {
        SearchOutcome::Results(records) => {
            for (index, record) in records.iter().enumerate() {
                println!(
                    "  [{}] {} - {} ({})",
                    index + 1,
                    record.title,
                    record.journal,
                    record.year
                );
            }
        }
        SearchOutcome::Advisory(advisory) => {
            println!("{advisory}");
        }
    }

    println!("follow-ups:");
    for follow_up in aggregator.follow_ups(question) {
        println!("  - {follow_up}");
    }
}

fn run_article_demo() {
    println!();
    println!("=== Article workflow ===");

    let repository = InMemoryArticleRepository::default();
    seed_sample_articles(&repository);
    let service = ArticleService::new(Arc::new(repository));

    match service.list(ArticleStatus::Featured, 10) {
        Ok(articles) => {
            for article in articles {
                println!("  [{}] {} ({})", article.status.label(), article.title, article.id);
            }
        }
        Err(error) => println!("  article listing unavailable: {error}"),
    }

    match service.stats() {
        Ok(stats) => println!("  stats: {stats:?}"),
        Err(error) => println!("  stats unavailable: {error}"),
    }
}
