//! Fan-out engine
//!
//! Resolves the destinations of a source channel and delivers one send
//! instruction to each of them. A failure for one destination is logged and
//! recorded in the report; it never stops delivery to the others.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use mirror_core::{ChatId, MappingRepository, SendSpec, Transport, TransportError, TransportResult};
use tracing::{debug, info, instrument, warn};

/// Result of delivering to a single destination
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub destination: ChatId,
    pub result: Result<(), TransportError>,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-destination outcomes of one fan-out
#[derive(Debug, Clone, Default)]
pub struct FanoutReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl FanoutReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome for a given destination, if it was attempted
    pub fn outcome_for(&self, destination: ChatId) -> Option<&DeliveryOutcome> {
        self.outcomes.iter().find(|o| o.destination == destination)
    }
}

/// Delivers send instructions to every destination mapped from a source
pub struct FanoutEngine<'a> {
    mappings: &'a dyn MappingRepository,
    concurrency: usize,
}

impl<'a> FanoutEngine<'a> {
    /// `concurrency` is the number of deliveries in flight at once; 0 is
    /// treated as 1.
    pub fn new(mappings: &'a dyn MappingRepository, concurrency: usize) -> Self {
        Self {
            mappings,
            concurrency: concurrency.max(1),
        }
    }

    /// Destinations mapped from `source`
    ///
    /// A lookup failure is logged and treated as "no destinations".
    #[instrument(skip(self))]
    pub async fn resolve(&self, source: ChatId) -> Vec<ChatId> {
        match self.mappings.list_destinations(source).await {
            Ok(destinations) => destinations,
            Err(err) => {
                warn!(%source, error = %err, "Failed to look up destinations");
                Vec::new()
            }
        }
    }

    /// Resolve the destinations of `source` and deliver `spec` to each
    pub async fn fanout(
        &self,
        source: ChatId,
        spec: &SendSpec,
        transport: &dyn Transport,
    ) -> FanoutReport {
        let destinations = self.resolve(source).await;
        self.deliver(&destinations, spec, transport).await
    }

    /// Deliver `spec` once to each distinct destination
    #[instrument(skip_all, fields(kind = spec.kind(), destinations = destinations.len()))]
    pub async fn deliver(
        &self,
        destinations: &[ChatId],
        spec: &SendSpec,
        transport: &dyn Transport,
    ) -> FanoutReport {
        let mut seen = HashSet::with_capacity(destinations.len());
        let unique: Vec<ChatId> = destinations
            .iter()
            .copied()
            .filter(|dest| seen.insert(*dest))
            .collect();

        if unique.is_empty() {
            debug!("No destinations to deliver to");
            return FanoutReport::default();
        }

        let outcomes: Vec<DeliveryOutcome> = stream::iter(unique)
            .map(|destination| async move {
                let result = send_to(transport, destination, spec).await;
                if let Err(err) = &result {
                    warn!(%destination, kind = spec.kind(), error = %err, "Delivery failed");
                }
                DeliveryOutcome {
                    destination,
                    result,
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let report = FanoutReport { outcomes };
        info!(
            kind = spec.kind(),
            delivered = report.delivered(),
            failed = report.failed(),
            "Fan-out complete"
        );
        report
    }
}

/// Perform the transport call matching `spec` for one destination
pub async fn send_to(
    transport: &dyn Transport,
    chat: ChatId,
    spec: &SendSpec,
) -> TransportResult<()> {
    match spec {
        SendSpec::Text { html, link_preview } => {
            transport.send_text(chat, html, *link_preview).await
        }
        SendSpec::Photo { file_id, caption } => transport.send_photo(chat, file_id, caption).await,
        SendSpec::Video { file_id, caption } => transport.send_video(chat, file_id, caption).await,
        SendSpec::Animation { file_id, caption } => {
            transport.send_animation(chat, file_id, caption).await
        }
        SendSpec::Document { file_id, caption } => {
            transport.send_document(chat, file_id, caption).await
        }
        SendSpec::Audio { file_id, caption } => transport.send_audio(chat, file_id, caption).await,
        SendSpec::Voice { file_id, caption } => transport.send_voice(chat, file_id, caption).await,
        SendSpec::VideoNote { file_id } => transport.send_video_note(chat, file_id).await,
        SendSpec::Poll(poll) => transport.send_poll(chat, poll).await,
        SendSpec::Copy {
            from_chat_id,
            message_id,
        } => transport.copy_message(chat, *from_chat_id, *message_id).await,
    }
}
