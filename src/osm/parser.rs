use anyhow::{Context, Result, bail};
use glam::{DVec2, Vec2};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;
use tracing::debug;

use super::{OsmData, parse_height};
use crate::config::dimensions::{DEFAULT_BUILDING_HEIGHT, HEIGHT_TAG_SCALE};
use crate::domain::{Node, NodeLookup, Way, WayFlags};
use crate::geometry::{Bounds, Mercator};

/// Name given to ways without a `name` tag
pub const UNNAMED: &str = "unnamed";

/// Read and parse an `.osm` XML file
pub fn load_osm(path: &Path) -> Result<OsmData> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read OSM file: {}", path.display()))?;
    parse_osm(&contents).with_context(|| format!("Failed to parse OSM file: {}", path.display()))
}

/// Parse an OSM XML document into projected records
///
/// # Algorithm
/// 1. Collect `<bounds>`, every `<node>` (projected with spherical Mercator)
///    and every `<way>` with its `<nd>` refs and `<tag>`s
/// 2. Take the extract center from `<bounds>`, or from the node extent when
///    the element is missing
/// 3. Store node positions relative to that center
///
/// Ways with fewer than 2 node refs are dropped. Relations are ignored.
pub fn parse_osm(xml: &str) -> Result<OsmData> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();

    let mut bounds: Option<Bounds> = None;
    let mut raw_nodes: Vec<(u64, DVec2)> = Vec::new();
    let mut ways: Vec<Way> = Vec::new();
    let mut current_way: Option<Way> = None;
    let mut dropped = 0usize;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"way" => current_way = Some(new_way(e)?),
                b"node" => raw_nodes.push(parse_node(e)?),
                b"bounds" => bounds = Some(parse_bounds(e)?),
                b"nd" | b"tag" => read_way_child(e, current_way.as_mut())?,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"nd" | b"tag" => read_way_child(e, current_way.as_mut())?,
                b"node" => raw_nodes.push(parse_node(e)?),
                b"bounds" => bounds = Some(parse_bounds(e)?),
                // A way without children has no refs and would be dropped
                b"way" => dropped += 1,
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"way"
                    && let Some(way) = current_way.take()
                {
                    if way.node_refs.len() >= 2 {
                        ways.push(way);
                    } else {
                        dropped += 1;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("XML error at byte {}", reader.error_position())
                });
            }
            _ => {}
        }

        buffer.clear();
    }

    if current_way.is_some() {
        bail!("Unterminated <way> element");
    }

    let extent = bounds.or_else(|| Bounds::from_points(raw_nodes.iter().map(|(_, p)| (p.x, p.y))));
    let origin = extent.map(|b| b.center()).unwrap_or(DVec2::ZERO);

    let nodes: NodeLookup = raw_nodes
        .into_iter()
        .map(|(id, p)| {
            let local = p - origin;
            Node::new(id, local.x as f32, local.y as f32)
        })
        .collect();

    debug!(
        "Parsed {} nodes and {} ways ({} ways with fewer than 2 refs dropped)",
        nodes.len(),
        ways.len(),
        dropped
    );

    Ok(OsmData {
        origin,
        center: Vec2::ZERO,
        nodes,
        ways,
    })
}

/// Read an `<nd>` or `<tag>` child into the open way, if any
fn read_way_child(e: &BytesStart, way: Option<&mut Way>) -> Result<()> {
    let Some(way) = way else {
        return Ok(());
    };
    match e.name().as_ref() {
        b"nd" => {
            let node_ref = attr(e, "ref")?.context("<nd> without ref")?;
            way.node_refs.push(
                node_ref
                    .parse()
                    .with_context(|| format!("Invalid node ref '{}'", node_ref))?,
            );
        }
        b"tag" => {
            let key = attr(e, "k")?.unwrap_or_default();
            let value = attr(e, "v")?.unwrap_or_default();
            apply_tag(way, &key, &value);
        }
        _ => {}
    }
    Ok(())
}

/// Fold a way tag into the record
fn apply_tag(way: &mut Way, key: &str, value: &str) {
    match key {
        "name" => way.name = value.to_string(),
        "height" => way.height = HEIGHT_TAG_SCALE * parse_height(value),
        _ => way.flags.apply_tag(key, value),
    }
}

fn new_way(e: &BytesStart) -> Result<Way> {
    Ok(Way {
        id: required(e, "id")?,
        name: UNNAMED.to_string(),
        node_refs: Vec::new(),
        height: DEFAULT_BUILDING_HEIGHT,
        flags: WayFlags::default(),
    })
}

fn parse_node(e: &BytesStart) -> Result<(u64, DVec2)> {
    let id: u64 = required(e, "id")?;
    let lat: f64 = required(e, "lat").with_context(|| format!("Node {}", id))?;
    let lon: f64 = required(e, "lon").with_context(|| format!("Node {}", id))?;
    let (x, y) = Mercator::project(lat, lon);
    Ok((id, DVec2::new(x, y)))
}

fn parse_bounds(e: &BytesStart) -> Result<Bounds> {
    Ok(Bounds::from_lat_lon(
        required(e, "minlat")?,
        required(e, "minlon")?,
        required(e, "maxlat")?,
        required(e, "maxlon")?,
    ))
}

/// Unescaped value of an attribute, if present
fn attr(e: &BytesStart, key: &str) -> Result<Option<String>> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parse a mandatory attribute
fn required<T>(e: &BytesStart, key: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let value = attr(e, key)?.with_context(|| format!("<{}> without {}", element, key))?;
    value
        .parse()
        .with_context(|| format!("Invalid {} '{}' on <{}>", key, value, element))
}
