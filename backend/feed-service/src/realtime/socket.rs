/// WebSocket session actor for feed viewers
///
/// Each connection owns one subscriber channel on the broadcaster. Events
/// arriving on the channel are forwarded verbatim as text frames; the
/// subscription is torn down when the session stops so the registry never
/// accumulates dead channels.
use actix::{Actor, ActorContext, AsyncContext, StreamHandler};
use actix_web_actors::ws;
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::realtime::{FeedBroadcaster, SubscriberId};

/// A serialized feed event ready to be written to the socket
struct OutboundEvent(String);

pub struct FeedSocket {
    id: SubscriberId,
    events: Option<UnboundedReceiver<String>>,
    broadcaster: FeedBroadcaster,
}

impl FeedSocket {
    pub fn new(
        id: SubscriberId,
        events: UnboundedReceiver<String>,
        broadcaster: FeedBroadcaster,
    ) -> Self {
        Self {
            id,
            events: Some(events),
            broadcaster,
        }
    }
}

impl Actor for FeedSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        if let Some(rx) = self.events.take() {
            ctx.add_stream(UnboundedReceiverStream::new(rx).map(OutboundEvent));
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        let broadcaster = self.broadcaster.clone();
        let id = self.id;
        actix::spawn(async move {
            broadcaster.unsubscribe(id).await;
        });
    }
}

impl StreamHandler<OutboundEvent> for FeedSocket {
    fn handle(&mut self, event: OutboundEvent, ctx: &mut Self::Context) {
        ctx.text(event.0);
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        // Broadcaster dropped the sender; nothing more will arrive.
        ctx.stop();
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for FeedSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => ctx.pong(&payload),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            // Viewers are read-only; inbound text/binary frames are ignored.
            Ok(_) => {}
            Err(err) => {
                tracing::debug!("websocket protocol error: {}", err);
                ctx.stop();
            }
        }
    }
}
