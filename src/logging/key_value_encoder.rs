use std::fmt::Write as _;

use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Encode, Write};
use serde::Deserialize;

const DEFAULT_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}";

#[derive(Debug, Deserialize)]
pub struct KeyValueEncoderConfig {
    pub pattern: Option<String>,
}

/// Pattern encoder that appends the record's key-value pairs as ` key=value`.
#[derive(Debug)]
pub struct KeyValueEncoder {
    delegate: PatternEncoder,
}

impl KeyValueEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
        }
    }
}

impl Encode for KeyValueEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;
        w.write_all(render_key_values(record).as_bytes())?;
        w.write_all(b"\n")?;
        Ok(())
    }
}

fn render_key_values(record: &Record) -> String {
    let mut collector = KeyValueCollector { out: String::new() };
    if let Err(e) = record.key_values().visit(&mut collector) {
        let _ = write!(collector.out, " [kv error: {}]", e);
    }
    collector.out
}

struct KeyValueCollector {
    out: String,
}

impl<'kvs> VisitSource<'kvs> for KeyValueCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        write!(self.out, " {}={}", key, value).map_err(|_| Error::msg("failed to format key-value pair"))
    }
}

pub struct KeyValueEncoderDeserializer;

impl log4rs::config::Deserialize for KeyValueEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = KeyValueEncoderConfig;

    fn deserialize(
        &self,
        config: KeyValueEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        Ok(Box::new(KeyValueEncoder::new(pattern)))
    }
}
