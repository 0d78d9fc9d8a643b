use clap::Parser;
use seo_config::{CrawlerConfig, ScoreWeights};
use seo_fetch::{DomainRateLimiter, HttpFetcher, RetryConfig};
use seo_pipeline::{run_crawl_job, InMemoryStore, PipelineRepos};
use seo_spider::Crawler;
use seo_types::{CrawlJobRepo, SiteRepo};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seo-crawl")]
#[command(about = "Crawl, analyze, and score one site end-to-end")]
struct Args {
    /// The site's start URL, e.g. https://example.com/
    start_url: String,

    #[arg(long, default_value = "10")]
    max_depth: u32,

    #[arg(long, default_value = "500")]
    max_pages: u32,

    /// Render pages with a headless browser instead of a plain HTTP GET.
    /// Only takes effect when this binary is built with the `browser`
    /// feature; otherwise a plain HTTP fetcher is used and a warning is
    /// logged.
    #[arg(long, default_value_t = false)]
    use_js_rendering: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let crawler_cfg = CrawlerConfig::from_env().unwrap_or_default();
    let score_weights = ScoreWeights::from_env().unwrap_or_default();

    let url = url::Url::parse(&args.start_url)?;
    let domain = url.host_str().ok_or_else(|| anyhow::anyhow!("start url has no host"))?.to_string();

    let store = Arc::new(InMemoryStore::new());
    let site = SiteRepo::create(&*store, &domain, &args.start_url).await?;
    let job = CrawlJobRepo::create(&*store, site.id, args.max_depth, args.max_pages).await?;

    let repos = PipelineRepos {
        site_repo: store.clone(),
        job_repo: store.clone(),
        page_repo: store.clone(),
        link_repo: store.clone(),
        score_repo: store.clone(),
        issue_repo: store.clone(),
        keyword_repo: store.clone(),
    };

    let fetcher: Arc<dyn seo_types::PageFetcher> = if args.use_js_rendering {
        build_browser_fetcher(&crawler_cfg).await?
    } else {
        Arc::new(HttpFetcher::new(
            &crawler_cfg.user_agent,
            crawler_cfg.request_timeout,
            RetryConfig {
                max_attempts: crawler_cfg.max_retries,
                initial_delay: crawler_cfg.retry_delay,
                ..RetryConfig::default()
            },
        )?)
    };
    let rate_limiter = Arc::new(DomainRateLimiter::new(crawler_cfg.rate_limit_rps));
    let crawler = Crawler::new(fetcher, rate_limiter, crawler_cfg.user_agent.clone())?;

    tracing::info!(site = %domain, job_id = %job.id, "starting crawl job");
    let outcome = run_crawl_job(&repos, &crawler, job.id, &crawler_cfg, &score_weights).await?;

    println!(
        "crawled {} pages ({} failed, {} left queued), overall score {:.2}",
        outcome.pages_crawled, outcome.pages_failed, outcome.pages_queued, outcome.overall_score
    );
    Ok(())
}

#[cfg(feature = "browser")]
async fn build_browser_fetcher(cfg: &CrawlerConfig) -> anyhow::Result<Arc<dyn seo_types::PageFetcher>> {
    let fetcher = seo_fetch::BrowserFetcher::launch(&cfg.user_agent, cfg.js_render_timeout).await?;
    Ok(Arc::new(fetcher))
}

#[cfg(not(feature = "browser"))]
async fn build_browser_fetcher(cfg: &CrawlerConfig) -> anyhow::Result<Arc<dyn seo_types::PageFetcher>> {
    tracing::warn!("--use-js-rendering requested but this binary was built without the `browser` feature; falling back to HTTP fetch");
    Ok(Arc::new(HttpFetcher::new(
        &cfg.user_agent,
        cfg.request_timeout,
        RetryConfig {
            max_attempts: cfg.max_retries,
            initial_delay: cfg.retry_delay,
            ..RetryConfig::default()
        },
    )?))
}
