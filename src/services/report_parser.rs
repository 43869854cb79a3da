use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::models::{AppError, AppResult, Report};

/// Decodes one `k1=v1;k2=v2;...` section parameter string.
///
/// Pieces are split on `;` first, then on the first `=` only, so values may
/// themselves contain `=`. A piece without `=` maps to the empty string, and
/// duplicate keys keep the last occurrence.
pub fn decode_params(raw: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for piece in raw.split(';') {
        match piece.split_once('=') {
            Some((key, value)) => params.insert(key.to_string(), value.to_string()),
            None => params.insert(piece.to_string(), String::new()),
        };
    }
    params
}

pub struct ReportParser;

impl ReportParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_file(&self, path: &Path) -> AppResult<Report> {
        let xml = fs::read_to_string(path)?;
        self.parse_str(&xml)
    }

    /// Streams the report document and collects every benchmark mean under
    /// `TestCase/Section` elements into named series, in document order.
    ///
    /// Any structural defect (missing `x` parameter, missing `mean` child or
    /// `value` attribute, malformed XML) aborts the whole parse.
    pub fn parse_str(&self, xml: &str) -> AppResult<Report> {
        let mut reader = Reader::from_str(xml);

        let mut report = Report::default();
        let mut buf = Vec::new();
        // open element names, root first
        let mut stack: Vec<String> = Vec::new();
        // x-value of the section currently being read, if inside one
        let mut section_x: Option<f64> = None;
        // series name currently being read, plus whether its mean was seen
        let mut current_series: Option<(String, bool)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().into_inner()).to_string();
                    match name.as_str() {
                        "Section" if stack.len() == 2 && stack[1] == "TestCase" => {
                            section_x = Some(self.read_section(e, &mut report)?);
                        }
                        "BenchmarkResults" if stack.len() == 3 && section_x.is_some() => {
                            let series_name = attribute_map(e)?.remove("name").ok_or(
                                AppError::MissingAttribute {
                                    element: "BenchmarkResults",
                                    attribute: "name",
                                },
                            )?;
                            report.data.entry(series_name.clone()).or_default();
                            current_series = Some((series_name, false));
                        }
                        "mean" if stack.len() == 4 => {
                            if let (Some(x), Some(series)) = (section_x, current_series.as_mut()) {
                                self.read_mean(e, x, series, &mut report)?;
                            }
                        }
                        _ => {}
                    }
                    stack.push(name);
                }
                Ok(Event::Empty(ref e)) => {
                    // self-closing elements never enter the stack
                    let name = String::from_utf8_lossy(e.name().into_inner());
                    if name == "mean" && stack.len() == 4 {
                        if let (Some(x), Some(series)) = (section_x, current_series.as_mut()) {
                            self.read_mean(e, x, series, &mut report)?;
                        }
                    } else if name == "BenchmarkResults" && stack.len() == 3 && section_x.is_some()
                    {
                        return Err(AppError::MissingElement {
                            parent: "BenchmarkResults",
                            child: "mean",
                        });
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some(closed) = stack.pop() {
                        match closed.as_str() {
                            "BenchmarkResults" if stack.len() == 3 => {
                                if let Some((_, mean_seen)) = current_series.take() {
                                    if !mean_seen {
                                        return Err(AppError::MissingElement {
                                            parent: "BenchmarkResults",
                                            child: "mean",
                                        });
                                    }
                                }
                            }
                            "Section" if stack.len() == 2 => section_x = None,
                            _ => {}
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(AppError::XmlParseError(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(report)
    }

    /// Decodes a section's `name` attribute and returns its mandatory
    /// x-value, recording `xlabel`/`xtick` on the report when present.
    fn read_section(&self, e: &BytesStart, report: &mut Report) -> AppResult<f64> {
        let raw = attribute_map(e)?
            .remove("name")
            .ok_or(AppError::MissingAttribute {
                element: "Section",
                attribute: "name",
            })?;
        let params = decode_params(&raw);

        // sections are expected to agree on these; last writer wins
        if let Some(label) = params.get("xlabel") {
            report.xlabel = Some(label.clone());
        }
        if let Some(tick) = params.get("xtick") {
            report.xtick = Some(parse_number("xtick", tick)?);
        }

        let x = params.get("x").ok_or_else(|| AppError::MissingParam {
            section: raw.clone(),
            param: "x",
        })?;
        parse_number("x", x)
    }

    fn read_mean(
        &self,
        e: &BytesStart,
        x: f64,
        series: &mut (String, bool),
        report: &mut Report,
    ) -> AppResult<()> {
        // only the first mean of a BenchmarkResults counts
        if series.1 {
            return Ok(());
        }
        let raw = attribute_map(e)?
            .remove("value")
            .ok_or(AppError::MissingAttribute {
                element: "mean",
                attribute: "value",
            })?;
        let y = parse_number("value", &raw)?;
        report.data.entry(series.0.clone()).or_default().push(x, y);
        series.1 = true;
        Ok(())
    }
}

fn attribute_map(e: &BytesStart) -> AppResult<HashMap<String, String>> {
    let mut attributes = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| AppError::XmlParseError(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.into_inner()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| AppError::XmlParseError(err.to_string()))?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn parse_number(name: &str, value: &str) -> AppResult<f64> {
    value.parse().map_err(|_| AppError::InvalidNumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}
