#![forbid(unsafe_code)]

//! The two walkthroughs: a writer feeding a book agency, and a news app
//! notifying readers by topic. Each returns the lines it prints so the
//! narrative can be checked in tests.

use std::rc::Rc;

use herald_agency::{
    BookAgency, Employee, GrammarChecker, NewsApp, NewsTopic, Publisher, ReaderId, TopicReader,
    Writer,
};
use herald_core::RegistryConfig;
use tracing::info_span;

/// Writer, grammar checkers and publishers around one book counter.
pub fn run_agency(config: &RegistryConfig) -> Vec<String> {
    let _span = info_span!("agency").entered();
    let mut out = Vec::new();

    let agency = BookAgency::with_config(0, config.clone());
    let checker = Rc::new(GrammarChecker::new("4576"));
    let publisher = Rc::new(Publisher::new("7622"));
    let copycat = Rc::new(Publisher::new("7622"));
    let second_checker = Rc::new(GrammarChecker::new("gfevue"));

    out.push(format!("hire 4576 (grammar checker): {:?}", agency.hire(&checker)));
    out.push(format!("hire 7622 (publisher): {:?}", agency.hire(&publisher)));
    out.push(format!(
        "hire and brief 7622 (copycat publisher): {:?}",
        agency.hire_and_brief(&copycat)
    ));
    out.push(format!(
        "hire gfevue (grammar checker): {:?}",
        agency.hire(&second_checker)
    ));
    out.push(format!(
        "dismiss gfevue: {}",
        agency.dismiss(second_checker.employee_id())
    ));

    let mut writer = Writer::represented_by(agency.clone());
    out.push("I wrote a book.".to_string());
    writer.write_book();

    for line in publisher.announcements() {
        out.push(line);
    }
    for line in copycat.announcements() {
        out.push(format!("(copycat) {line}"));
    }
    out.push(format!(
        "grammar checks: 4576={} gfevue={}",
        checker.checks_run(),
        second_checker.checks_run()
    ));
    out.push(format!("books at the agency: {}", agency.book_count()));
    out
}

/// Readers following one topic each, with one reader leaving midway.
pub fn run_news() -> Vec<String> {
    let _span = info_span!("news").entered();
    let mut out = Vec::new();

    let mut app = NewsApp::new();
    let flag = app.publishing_flag();
    let readers: Vec<Rc<TopicReader>> = [
        NewsTopic::Economics,
        NewsTopic::Politics,
        NewsTopic::Culture,
        NewsTopic::Culture,
    ]
    .into_iter()
    .zip(1u32..)
    .map(|(topic, id)| Rc::new(TopicReader::new(ReaderId(id), topic).watching(flag.clone())))
    .collect();
    for reader in &readers {
        app.add_reader(reader);
    }

    app.publish_article(
        NewsTopic::Culture,
        "Lorem ipsum dolor",
        "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.",
    );
    if let Some(last) = readers.last() {
        app.remove_reader(&**last);
    }
    app.publish_article(
        NewsTopic::Culture,
        "Foo baz bar",
        "Excepteur sint occaecat cupidatat non proident.",
    );

    for topic in NewsTopic::ALL {
        let ids: Vec<String> = app.readers(topic).iter().map(ToString::to_string).collect();
        out.push(format!("{topic} readers: [{}]", ids.join(", ")));
    }
    for (idx, reader) in readers.iter().enumerate() {
        out.push(format!(
            "reader-{} inbox: {:?}",
            idx + 1,
            reader.inbox()
        ));
    }
    out
}
