use tracing::Event;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::registry::LookupSpan;

/// `LEVEL timestamp::engine::span>span::file::line::message`
///
/// The span segment lists the open `#[instrument]` spans from the outermost
/// inwards (`analyze>load_transactions`) and is left out when no span is open.
/// Source paths are trimmed to the part below `src/`.
#[derive(Debug, Clone)]
pub struct FraudshieldFormat {
    pub engine_name: String,
}

impl FraudshieldFormat {
    pub fn new(engine_name: impl Into<String>) -> Self {
        Self {
            engine_name: engine_name.into(),
        }
    }
}

/// `fraudshield/src/scorer.rs` → `scorer.rs`
fn short_path(file: &str) -> &str { file.rsplit_once("src/").map_or(file, |(_, rest)| rest) }

impl<S, N> FormatEvent<S, N> for FraudshieldFormat
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        // Events bridged from other logging facades carry no location
        let Some(file) = metadata.file() else {
            if !cfg!(feature = "deep-trace") {
                return Ok(());
            }
            return self.write_event(ctx, writer, event, "unknown", 0);
        };

        self.write_event(ctx, writer, event, short_path(file), metadata.line().unwrap_or(0))
    }
}

impl FraudshieldFormat {
    fn write_event<S, N>(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
        file: &str,
        line: u32,
    ) -> std::fmt::Result
    where
        S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
        N: for<'writer> FormatFields<'writer> + 'static,
    {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
        write!(writer, "{} {}::{}::", event.metadata().level(), timestamp, self.engine_name)?;

        let spans: Vec<&str> = ctx
            .event_scope()
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();
        if !spans.is_empty() {
            write!(writer, "{}::", spans.join(">"))?;
        }

        write!(writer, "{}::{}::", file, line)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;
    use std::sync::Mutex;

    use tracing_subscriber::prelude::*;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    fn capture(emit: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(FraudshieldFormat::new("engine"))
                .with_writer(move || writer.clone()),
        );

        tracing::subscriber::with_default(subscriber, emit);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn trims_paths_below_src() {
        assert_eq!(short_path("fraudshield/src/render/network.rs"), "render/network.rs");
        assert_eq!(short_path("src/scorer.rs"), "scorer.rs");
        assert_eq!(short_path("build.rs"), "build.rs");
    }

    #[test]
    fn event_outside_spans_has_no_span_segment() {
        let output = capture(|| tracing::info!("scorer::empty_graph"));

        assert!(output.starts_with("INFO "));
        assert!(output.contains("::engine::tracing/format.rs::"));
        assert!(output.ends_with("::scorer::empty_graph\n"));
    }

    #[test]
    fn event_inside_spans_lists_them_outermost_first() {
        let output = capture(|| {
            let outer = tracing::info_span!("analyze");
            let _outer = outer.enter();
            let inner = tracing::debug_span!("load_transactions");
            let _inner = inner.enter();
            tracing::warn!("loader::slow");
        });

        assert!(output.starts_with("WARN "));
        assert!(output.contains("::engine::analyze>load_transactions::tracing/format.rs::"));
    }
}
