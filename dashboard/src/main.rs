//! Dashboard state demo
//!
//! Drives the root reducer through a typical session: navigate to the
//! dashboard, load the courses index and a page of learners, then fail to
//! load a report.

use anyhow::Context;
use chrono::TimeZone;
use figures_dashboard::models::{CourseSummary, LearnerCourse, LearnerDetails, Page, UserSummary};
use figures_dashboard::reducers::{courses_index, report, user_data, users_index};
use figures_dashboard::routing::{location_change, HistoryAction, Location};
use figures_dashboard::{root_reducer, DashboardConfig};
use figures_state_core::environment::SystemClock;
use figures_state_runtime::metrics::describe_store_metrics;
use figures_state_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn course(id: &str, name: &str, org: &str) -> CourseSummary {
    CourseSummary {
        id: id.to_string(),
        name: name.to_string(),
        org: org.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "figures_dashboard=debug,figures_state_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    describe_store_metrics();

    let config = DashboardConfig::from_env().context("reading dashboard configuration")?;
    let store = Store::new(root_reducer(), config.store_config());
    let clock = SystemClock;

    println!("=== Figures Dashboard State ===\n");
    println!("Slices: {:?}", figures_dashboard::SLICE_KEYS);

    println!("\n>>> Navigating to /figures/");
    store
        .send(location_change(
            &Location::from_path("/figures/").with_action(HistoryAction::Push),
        )?)
        .await?;

    println!(">>> Loading courses index");
    store.send(courses_index::request_courses_index()).await?;
    let courses = vec![
        course("course-v1:AlphaOrg+A001+RUN", "Alpha Course 1", "AlphaOrg"),
        course("course-v1:AlphaOrg+A002+RUN", "Alpha Course 2", "AlphaOrg"),
        course("course-v1:BravoOrg+A001+RUN", "Bravo Course 1", "BravoOrg"),
        course("course-v1:BravoOrg+B002+RUN", "Bravo Course 2", "BravoOrg"),
    ];
    store
        .send(courses_index::load_courses_index(&clock, &courses)?)
        .await?;

    let alpha = store.state(|s| courses_index::courses_for_org(&s.courses_index, "AlphaOrg").count());
    println!("    {} courses, {alpha} from AlphaOrg", courses.len());

    println!(">>> Loading first page of learners");
    store.send(users_index::request_users_index()).await?;
    let page = Page {
        count: 2,
        next: None,
        previous: None,
        results: vec![
            UserSummary {
                id: 1,
                username: "alpha_one".to_string(),
                fullname: "Alpha One".to_string(),
            },
            UserSummary {
                id: 2,
                username: "bravo_two".to_string(),
                fullname: "Bravo Two".to_string(),
            },
        ],
    };
    store.send(users_index::load_users_index(&clock, &page)?).await?;

    println!(">>> Opening learner 1");
    store
        .send(location_change(
            &Location::from_path("/figures/user/1").with_action(HistoryAction::Push),
        )?)
        .await?;
    store.send(user_data::request_user_data()).await?;
    let joined = chrono::Utc
        .with_ymd_and_hms(2024, 9, 1, 12, 0, 0)
        .single()
        .context("building join date")?;
    let learner = LearnerDetails {
        id: 1,
        username: "alpha_one".to_string(),
        name: "Alpha One".to_string(),
        email: "alpha_one@example.com".to_string(),
        is_active: true,
        date_joined: joined,
        courses: vec![LearnerCourse {
            course_id: "course-v1:AlphaOrg+A001+RUN".to_string(),
            course_name: "Alpha Course 1".to_string(),
            progress: 0.75,
        }],
    };
    store.send(user_data::load_user_data(&clock, learner)?).await?;

    println!(">>> Requesting a report");
    store.send(report::request_report()).await?;
    store
        .send(report::report_failed("503 Service Unavailable")?)
        .await?;

    let snapshot = store.snapshot();
    println!("\nFinal state:");
    println!("{}", serde_json::to_string_pretty(&*snapshot)?);

    println!("\nDispatched {} actions:", store.dispatched());
    for record in store.history() {
        println!("  #{:<3} {}", record.sequence, record.action.kind());
    }

    store.shutdown();
    Ok(())
}
