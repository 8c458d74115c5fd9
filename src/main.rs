use anyhow::Context;
use clap::Parser;
use poetry_archive::{cli, config, export, site};
use poetry_archive_common::{parse_year, tag_counts, year_counts, Classifier, PipelineOptions};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;
    let pipeline = PipelineOptions {
        preview_length: config.preview_length,
    };

    match cli.command {
        Commands::Build { input, public, format, topics } => {
            println!("📖 poetry-archive - サイト生成\n");

            let table = config
                .load_topics(topics.as_deref())
                .context("トピック表の読み込みに失敗")?;

            let options = site::BuildOptions {
                input,
                public_dir: public,
                format,
                site: export::SiteInfo::from(&config),
                pipeline,
            };
            let summary = site::build_site(&options, &table)
                .with_context(|| format!("{} からの生成に失敗", options.input.display()))?;

            println!("\n詩: {}篇", summary.data.poems.len());
            println!("原稿: {}ページ", summary.assets.pages.len());
            println!("タグ: {}", summary.data.all_tags.join(", "));
            if let Some((first, last)) = summary.year_range() {
                println!("年: {} - {}", first, last);
            }

            println!("\n✅ 生成完了: {}", options.public_dir.display());
        }

        Commands::Stats { input, topics } => {
            let table = config
                .load_topics(topics.as_deref())
                .context("トピック表の読み込みに失敗")?;
            let data = site::load_archive(&input, &table, &pipeline)
                .with_context(|| format!("{} の読み込みに失敗", input.display()))?;

            let untagged = data.poems.iter().filter(|p| p.tags.is_empty()).count();
            let undated = data.poems.iter().filter(|p| p.parsed_year.is_none()).count();

            println!("詩: {}篇（タグなし {} / 年なし {}）", data.poems.len(), untagged, undated);

            println!("\nタグ:");
            for (tag, count) in tag_counts(&data.poems) {
                println!("  {:<16} {}", tag, count);
            }

            println!("\n年:");
            for (year, count) in year_counts(&data.poems) {
                println!("  {}  {}", year, count);
            }
        }

        Commands::Tag { text, title, topics } => {
            let table = config
                .load_topics(topics.as_deref())
                .context("トピック表の読み込みに失敗")?;
            let classifier = Classifier::new(&table);

            let tags = classifier.tag(&title, &text);
            if tags.is_empty() {
                println!("(タグなし)");
            }
            for tag in &tags {
                let keyword = classifier.matched_keyword(tag, &title, &text).unwrap_or("");
                println!("{}  ← \"{}\"", tag, keyword);
            }
        }

        Commands::Year { raw } => match parse_year(Some(raw.as_str())) {
            Some(year) => println!("{}", year),
            None => println!("(年なし)"),
        },

        Commands::Topics { topics, json } => {
            let table = config
                .load_topics(topics.as_deref())
                .context("トピック表の読み込みに失敗")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for topic in table.topics() {
                    println!("{:<16} {}", topic.name, topic.keywords.join(", "));
                }
            }
        }

        Commands::Config { set_title, set_author, set_topics, show } => {
            let mut config = config;

            if let Some(title) = set_title {
                config.set_site_title(title)?;
                println!("✔ サイトタイトルを設定しました");
            }

            if let Some(author) = set_author {
                config.set_author_line(author)?;
                println!("✔ 著者表記を設定しました");
            }

            if let Some(path) = set_topics {
                config
                    .set_topics_file(path)
                    .context("トピック表ファイルが不正です")?;
                println!("✔ トピック表を設定しました");
            }

            if show {
                println!("設定:");
                println!("  タイトル: {}", config.site_title);
                println!("  著者: {}", config.author_line);
                println!("  フッター: {}", config.footer_line);
                println!("  プレビュー長: {}", config.preview_length);
                println!(
                    "  トピック表: {}",
                    config
                        .topics_path(None)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
            }
        }
    }

    Ok(())
}
