//! FlowBus pub/sub for editor change notifications.
//!
//! Every effective mutation in an [`EditorSession`](crate::EditorSession)
//! publishes an [`EditorFlow`] carrying the new snapshot, so a renderer
//! redraws from the event alone. No-op mutations publish nothing.
//!
//! # Pattern Matching
//!
//! Patterns use dot-separated tokens with wildcards:
//! - `*` matches exactly one token: `block.*` matches `block.moved` but not `block.text.edited`
//! - `>` matches one or more tokens (only at end): `block.>` matches both
//! - Exact match: `tag.added` only matches `tag.added`

use tokio::sync::broadcast;

use blockpad_types::BlockId;

use crate::snapshot::{DocumentSnapshot, TagSnapshot};

// ============================================================================
// Pattern Matching
// ============================================================================

/// Check if a subject matches a pattern.
pub fn matches_pattern(pattern: &str, subject: &str) -> bool {
    let pattern_tokens: Vec<&str> = pattern.split('.').collect();
    let subject_tokens: Vec<&str> = subject.split('.').collect();

    let mut pi = 0;
    let mut si = 0;

    while pi < pattern_tokens.len() && si < subject_tokens.len() {
        match pattern_tokens[pi] {
            // `>` must be last and swallows the rest
            ">" => return pi == pattern_tokens.len() - 1,
            "*" => {
                pi += 1;
                si += 1;
            }
            token => {
                if token != subject_tokens[si] {
                    return false;
                }
                pi += 1;
                si += 1;
            }
        }
    }

    pi == pattern_tokens.len() && si == subject_tokens.len()
}

// ============================================================================
// Flow Message Types
// ============================================================================

/// Payloads routed by subject.
pub trait HasSubject {
    fn subject(&self) -> &'static str;
}

/// A payload stamped with its subject, as delivered to subscribers.
#[derive(Clone, Debug)]
pub struct FlowMessage<T> {
    pub subject: &'static str,
    pub payload: T,
}

impl<T: HasSubject> FlowMessage<T> {
    pub fn new(payload: T) -> Self {
        Self {
            subject: payload.subject(),
            payload,
        }
    }
}

// ============================================================================
// Editor Flow Events
// ============================================================================

/// Editor change events.
///
/// Document events carry the full snapshot produced by the mutation.
#[derive(Clone, Debug)]
pub enum EditorFlow {
    /// A block was appended at the end.
    BlockAppended {
        block_id: BlockId,
        document: DocumentSnapshot,
    },

    /// A block's content was replaced.
    BlockContentUpdated {
        block_id: BlockId,
        document: DocumentSnapshot,
    },

    /// The block at `from` now sits at `to`.
    BlockMoved {
        from: usize,
        to: usize,
        document: DocumentSnapshot,
    },

    /// A tag was added.
    TagAdded { tag: String, tags: TagSnapshot },

    /// The free-text sink changed; `len` counts chars, not bytes.
    TextChanged { len: usize },
}

impl EditorFlow {
    /// The document snapshot carried by block events.
    pub fn document(&self) -> Option<&DocumentSnapshot> {
        match self {
            Self::BlockAppended { document, .. }
            | Self::BlockContentUpdated { document, .. }
            | Self::BlockMoved { document, .. } => Some(document),
            Self::TagAdded { .. } | Self::TextChanged { .. } => None,
        }
    }
}

impl HasSubject for EditorFlow {
    fn subject(&self) -> &'static str {
        match self {
            Self::BlockAppended { .. } => "block.appended",
            Self::BlockContentUpdated { .. } => "block.content",
            Self::BlockMoved { .. } => "block.moved",
            Self::TagAdded { .. } => "tag.added",
            Self::TextChanged { .. } => "text.changed",
        }
    }
}

// ============================================================================
// FlowBus
// ============================================================================

/// Subject-routed fan-out over a broadcast channel.
///
/// `publish` never blocks, so it can run inside a synchronous mutation.
#[derive(Debug)]
pub struct FlowBus<T: Clone + Send + 'static> {
    tx: broadcast::Sender<FlowMessage<T>>,
}

impl<T: Clone + Send + HasSubject + 'static> FlowBus<T> {
    /// `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a payload to the bus.
    ///
    /// Returns the number of subscribers that received the message (zero
    /// when nobody is listening, which is not an error).
    pub fn publish(&self, payload: T) -> usize {
        self.tx.send(FlowMessage::new(payload)).unwrap_or(0)
    }

    /// Subscribe to messages matching a pattern.
    pub fn subscribe(&self, pattern: &str) -> Subscription<T> {
        Subscription {
            pattern: pattern.to_string(),
            rx: self.tx.subscribe(),
        }
    }
}

impl<T: Clone + Send + 'static> Clone for FlowBus<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// A subscription to a FlowBus with pattern filtering.
pub struct Subscription<T: Clone> {
    pattern: String,
    rx: broadcast::Receiver<FlowMessage<T>>,
}

impl<T: Clone> Subscription<T> {
    /// Receive the next matching message, waiting if necessary.
    ///
    /// Returns None once the bus is gone.
    pub async fn recv(&mut self) -> Option<FlowMessage<T>> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => {
                    if matches_pattern(&self.pattern, msg.subject) {
                        return Some(msg);
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        pattern = %self.pattern,
                        lagged = n,
                        "Flow subscription lagged behind"
                    );
                }
            }
        }
    }

    /// Receive the next matching message without blocking.
    pub fn try_recv(&mut self) -> Option<FlowMessage<T>> {
        loop {
            match self.rx.try_recv() {
                Ok(msg) => {
                    if matches_pattern(&self.pattern, msg.subject) {
                        return Some(msg);
                    }
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!(
                        pattern = %self.pattern,
                        lagged = n,
                        "Flow subscription lagged behind"
                    );
                }
            }
        }
    }

    /// Drain every matching message currently queued.
    pub fn drain(&mut self) -> Vec<FlowMessage<T>> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl<T: Clone> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching_exact() {
        assert!(matches_pattern("tag.added", "tag.added"));
        assert!(!matches_pattern("tag.added", "block.moved"));
        assert!(!matches_pattern("tag.added", "tag.added.extra"));
    }

    #[test]
    fn test_pattern_matching_single_wildcard() {
        assert!(matches_pattern("block.*", "block.appended"));
        assert!(matches_pattern("block.*", "block.moved"));
        assert!(!matches_pattern("block.*", "block.text.edited"));
        assert!(!matches_pattern("block.*", "tag.added"));
        assert!(matches_pattern("*.added", "tag.added"));
    }

    #[test]
    fn test_pattern_matching_multi_wildcard() {
        assert!(matches_pattern(">", "block.moved"));
        assert!(matches_pattern("block.>", "block.content"));
        assert!(matches_pattern("block.>", "block.a.b.c"));
        assert!(!matches_pattern("block.>", "block"));
        assert!(!matches_pattern("block.>", "tag.added"));
    }

    #[test]
    fn test_editor_flow_subjects() {
        let tags = TagSnapshot::default();
        assert_eq!(
            EditorFlow::TagAdded { tag: "x".into(), tags }.subject(),
            "tag.added"
        );
        assert_eq!(EditorFlow::TextChanged { len: 0 }.subject(), "text.changed");
        let moved = EditorFlow::BlockMoved {
            from: 0,
            to: 1,
            document: DocumentSnapshot::default(),
        };
        assert_eq!(moved.subject(), "block.moved");
        assert!(moved.document().is_some());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = FlowBus::<EditorFlow>::new(4);
        assert_eq!(bus.publish(EditorFlow::TextChanged { len: 1 }), 0);
    }

    #[test]
    fn test_subscription_filters() {
        let bus = FlowBus::<EditorFlow>::new(16);
        let mut blocks = bus.subscribe("block.*");
        let mut all = bus.subscribe(">");

        bus.publish(EditorFlow::TextChanged { len: 3 });
        bus.publish(EditorFlow::BlockMoved {
            from: 1,
            to: 0,
            document: DocumentSnapshot::default(),
        });

        let msg = blocks.try_recv().unwrap();
        assert_eq!(msg.subject, "block.moved");
        assert!(blocks.try_recv().is_none());
        assert_eq!(all.drain().len(), 2);
    }

    #[test]
    fn test_lagged_subscriber_keeps_receiving() {
        let bus = FlowBus::<EditorFlow>::new(2);
        let mut sub = bus.subscribe("text.*");
        for len in 0..5 {
            bus.publish(EditorFlow::TextChanged { len });
        }
        // Oldest messages were overwritten; the newest survive
        let received = sub.drain();
        assert_eq!(received.len(), 2);
        assert!(matches!(
            received[1].payload,
            EditorFlow::TextChanged { len: 4 }
        ));
    }

    #[tokio::test]
    async fn test_async_recv() {
        let bus = FlowBus::<EditorFlow>::new(4);
        let mut sub = bus.subscribe("tag.added");
        bus.publish(EditorFlow::TagAdded {
            tag: "draft".into(),
            tags: TagSnapshot::default(),
        });

        let msg = sub.recv().await.unwrap();
        assert!(matches!(msg.payload, EditorFlow::TagAdded { ref tag, .. } if tag == "draft"));

        drop(bus);
        assert!(sub.recv().await.is_none());
    }
}
