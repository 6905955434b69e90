#![forbid(unsafe_code)]

//! Topic-scoped news notifications.
//!
//! A [`NewsApp`] keeps one [`Subject`] per [`NewsTopic`]. Readers subscribe
//! to the topic they care about and only hear about articles published
//! there. Readers are keyed by an integer [`ReaderId`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use herald_core::{Listener, Registration, Subject};
use tracing::{debug, info};

/// Article categories. Every reader follows exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NewsTopic {
    Economics,
    Politics,
    Culture,
}

impl NewsTopic {
    pub const ALL: [NewsTopic; 3] = [Self::Economics, Self::Politics, Self::Culture];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Economics => "economics",
            Self::Politics => "politics",
            Self::Culture => "culture",
        }
    }
}

impl fmt::Display for NewsTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Registration id of a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReaderId(pub u32);

impl From<u32> for ReaderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ReaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reader-{}", self.0)
    }
}

/// What readers are told about: the latest article on their topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub topic: NewsTopic,
    pub title: String,
}

/// Shared view of whether the app is in the middle of a publish pass.
#[derive(Debug, Clone, Default)]
pub struct PublishingFlag(Rc<Cell<bool>>);

impl PublishingFlag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    fn set(&self, on: bool) {
        self.0.set(on);
    }
}

/// A listener that follows one topic under a stable id.
pub trait NewsReader: Listener<Option<Headline>> {
    fn reader_id(&self) -> ReaderId;
    fn favourite_topic(&self) -> NewsTopic;
}

type Channel = Subject<Option<Headline>, ReaderId>;

/// Publishes articles and notifies readers of the matching topic.
#[derive(Debug)]
pub struct NewsApp {
    economics: Channel,
    politics: Channel,
    culture: Channel,
    articles: HashMap<String, String>,
    publishing: PublishingFlag,
}

impl Default for NewsApp {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            economics: Subject::new(None),
            politics: Subject::new(None),
            culture: Subject::new(None),
            articles: HashMap::new(),
            publishing: PublishingFlag::default(),
        }
    }

    fn channel(&self, topic: NewsTopic) -> &Channel {
        match topic {
            NewsTopic::Economics => &self.economics,
            NewsTopic::Politics => &self.politics,
            NewsTopic::Culture => &self.culture,
        }
    }

    /// Subscribe `reader` to its favourite topic.
    pub fn add_reader<R>(&self, reader: &Rc<R>) -> Registration
    where
        R: NewsReader + 'static,
    {
        let topic = reader.favourite_topic();
        let outcome = self.channel(topic).register(reader, reader.reader_id());
        debug!(reader = %reader.reader_id(), %topic, ?outcome, "reader added");
        outcome
    }

    /// Unsubscribe `reader` from its favourite topic.
    pub fn remove_reader<R>(&self, reader: &R) -> bool
    where
        R: NewsReader + ?Sized,
    {
        self.channel(reader.favourite_topic())
            .unregister(&reader.reader_id())
    }

    /// Archive an article and notify the readers of `topic`.
    pub fn publish_article(
        &mut self,
        topic: NewsTopic,
        title: impl Into<String>,
        content: impl Into<String>,
    ) {
        let title = title.into();
        info!(%topic, title = %title, "publishing article");
        self.articles.insert(title.clone(), content.into());

        self.publishing.set(true);
        self.channel(topic)
            .set_value(Some(Headline { topic, title }));
        self.publishing.set(false);
    }

    /// Content of a previously published article.
    #[must_use]
    pub fn article(&self, title: &str) -> Option<&str> {
        self.articles.get(title).map(String::as_str)
    }

    /// Whether a publish pass is currently running.
    #[must_use]
    pub fn is_publishing(&self) -> bool {
        self.publishing.is_set()
    }

    /// Handle readers can keep to check [`is_publishing`](Self::is_publishing)
    /// from inside their callbacks.
    #[must_use]
    pub fn publishing_flag(&self) -> PublishingFlag {
        self.publishing.clone()
    }

    /// Ids subscribed to `topic`, in subscription order.
    #[must_use]
    pub fn readers(&self, topic: NewsTopic) -> Vec<ReaderId> {
        self.channel(topic).ids()
    }

    /// Latest headline on `topic`, if anything was published there.
    #[must_use]
    pub fn latest(&self, topic: NewsTopic) -> Option<Headline> {
        self.channel(topic).current_value()
    }
}

/// Stock reader: keeps the titles it was told about.
#[derive(Debug)]
pub struct TopicReader {
    id: ReaderId,
    topic: NewsTopic,
    inbox: RefCell<Vec<String>>,
    publishing: Option<PublishingFlag>,
}

impl TopicReader {
    #[must_use]
    pub fn new(id: ReaderId, topic: NewsTopic) -> Self {
        Self {
            id,
            topic,
            inbox: RefCell::new(Vec::new()),
            publishing: None,
        }
    }

    /// Only accept headlines delivered while `flag` is set.
    #[must_use]
    pub fn watching(mut self, flag: PublishingFlag) -> Self {
        self.publishing = Some(flag);
        self
    }

    /// Titles received so far, oldest first.
    #[must_use]
    pub fn inbox(&self) -> Vec<String> {
        self.inbox.borrow().clone()
    }
}

impl Listener<Option<Headline>> for TopicReader {
    fn on_value_changed(&self, headline: &Option<Headline>) {
        let Some(headline) = headline else {
            return;
        };
        if self.publishing.as_ref().is_some_and(|flag| !flag.is_set()) {
            return;
        }
        info!(
            reader = %self.id,
            topic = %headline.topic,
            title = %headline.title,
            "new article on favourite topic"
        );
        self.inbox.borrow_mut().push(headline.title.clone());
    }
}

impl NewsReader for TopicReader {
    fn reader_id(&self) -> ReaderId {
        self.id
    }

    fn favourite_topic(&self) -> NewsTopic {
        self.topic
    }
}
