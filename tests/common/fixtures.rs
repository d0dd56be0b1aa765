use roadweave::topic::Topic;
use roadweave::types::{TopicId, TopicRef};

/// Build `n` distinct topics `t0..t{n-1}`.
pub fn topics(n: usize) -> Vec<Topic> {
    (0..n)
        .map(|i| {
            Topic::new(
                format!("t{i}"),
                format!("Topic {i}"),
                format!("All about topic {i}"),
            )
        })
        .collect()
}

pub fn topic_ref(id: &str, label: &str) -> TopicRef {
    TopicRef::new(TopicId::from(id), label)
}
