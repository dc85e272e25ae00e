//! GML edge-set loader.
//!
//! Reads `graph [ node [ ... ] edge [ ... ] ]` files and turns them into the
//! node names and edge specs the topology factory consumes. Node ids may be
//! sparse; they are mapped to dense indices in file order.

use std::collections::HashMap;
use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{debug, warn};

use crate::topology::{EdgeSpec, Weight};
use crate::utils::latency::parse_latency_ms;

/// A node in a GML graph
#[derive(Debug, Clone, PartialEq)]
pub struct GmlNode {
    pub id: u32,
    pub label: Option<String>,
    pub attributes: HashMap<String, String>,
}

/// An edge in a GML graph
#[derive(Debug, Clone, PartialEq)]
pub struct GmlEdge {
    pub source: u32,
    pub target: u32,
    pub attributes: HashMap<String, String>,
}

impl GmlEdge {
    /// Fixed weight from a `weight` attribute, else from `latency`
    pub fn weight(&self) -> Result<Option<Weight>> {
        if let Some(raw) = self.attributes.get("weight") {
            let weight = raw
                .trim_matches('"')
                .parse::<Weight>()
                .map_err(|_| eyre!("Invalid weight '{}' on edge {}-{}", raw, self.source, self.target))?;
            return Ok(Some(weight));
        }
        if let Some(raw) = self.attributes.get("latency") {
            let weight = parse_latency_ms(raw)
                .map_err(|e| eyre!("Edge {}-{}: {}", self.source, self.target, e))?;
            return Ok(Some(weight));
        }
        Ok(None)
    }
}

/// A complete GML graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GmlGraph {
    pub nodes: Vec<GmlNode>,
    pub edges: Vec<GmlEdge>,
    pub attributes: HashMap<String, String>,
}

/// Node names and edges ready for the topology factory
#[derive(Debug, Clone, PartialEq)]
pub struct GmlTopology {
    pub names: Vec<String>,
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Value(String),
    Open,
    Close,
    End,
}

/// Tokenizer over GML text; `#` starts a line comment
struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        loop {
            match self.chars.peek().copied() {
                None => return Ok(Token::End),
                Some(c) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some('#') => {
                    while let Some(c) = self.chars.next() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('[') => {
                    self.chars.next();
                    return Ok(Token::Open);
                }
                Some(']') => {
                    self.chars.next();
                    return Ok(Token::Close);
                }
                Some('"') => {
                    self.chars.next();
                    return self.quoted().map(Token::Value);
                }
                Some(c) if c.is_alphabetic() || c == '_' => return Ok(Token::Key(self.word())),
                Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                    return Ok(Token::Value(self.word()))
                }
                Some(c) => return Err(eyre!("Unexpected character '{}' in GML input", c)),
            }
        }
    }

    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '+') {
                word.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        word
    }

    fn quoted(&mut self) -> Result<String> {
        let mut value = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '"' => return Ok(value),
                '\\' => match self.chars.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                _ => value.push(c),
            }
        }
        Err(eyre!("Unterminated string literal"))
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(eyre!("Expected {:?}, found {:?}", expected, self.current))
        }
    }

    /// `key value` pairs until the closing bracket; nested lists are skipped
    fn attributes(&mut self) -> Result<HashMap<String, String>> {
        let mut attributes = HashMap::new();
        loop {
            match self.advance()? {
                Token::Close => return Ok(attributes),
                Token::Key(key) => match self.advance()? {
                    Token::Key(value) | Token::Value(value) => {
                        attributes.insert(key, value);
                    }
                    Token::Open => {
                        debug!("Skipping nested GML list '{}'", key);
                        self.skip_list()?;
                    }
                    other => return Err(eyre!("Expected value for '{}', found {:?}", key, other)),
                },
                other => return Err(eyre!("Expected attribute name, found {:?}", other)),
            }
        }
    }

    fn skip_list(&mut self) -> Result<()> {
        let mut depth = 1;
        while depth > 0 {
            match self.advance()? {
                Token::Open => depth += 1,
                Token::Close => depth -= 1,
                Token::End => return Err(eyre!("Unterminated GML list")),
                _ => {}
            }
        }
        Ok(())
    }

    fn graph(&mut self) -> Result<GmlGraph> {
        self.expect(Token::Key("graph".to_string()))?;
        self.expect(Token::Open)?;

        let mut graph = GmlGraph::default();
        loop {
            match self.advance()? {
                Token::Close => break,
                Token::Key(key) if key == "node" => {
                    self.expect(Token::Open)?;
                    graph.nodes.push(node_from(self.attributes()?)?);
                }
                Token::Key(key) if key == "edge" => {
                    self.expect(Token::Open)?;
                    graph.edges.push(edge_from(self.attributes()?)?);
                }
                Token::Key(key) => match self.advance()? {
                    Token::Key(value) | Token::Value(value) => {
                        graph.attributes.insert(key, value);
                    }
                    Token::Open => self.skip_list()?,
                    other => return Err(eyre!("Expected value for '{}', found {:?}", key, other)),
                },
                other => return Err(eyre!("Expected keyword in graph, found {:?}", other)),
            }
        }
        Ok(graph)
    }
}

fn node_from(mut attributes: HashMap<String, String>) -> Result<GmlNode> {
    let raw = attributes
        .remove("id")
        .ok_or_else(|| eyre!("Node missing required 'id' attribute"))?;
    let id = raw.parse::<u32>().map_err(|_| eyre!("Invalid node id: {}", raw))?;
    let label = attributes.remove("label");
    Ok(GmlNode { id, label, attributes })
}

fn edge_from(mut attributes: HashMap<String, String>) -> Result<GmlEdge> {
    let mut endpoint = |key: &str| -> Result<u32> {
        let raw = attributes
            .remove(key)
            .ok_or_else(|| eyre!("Edge missing required '{}' attribute", key))?;
        raw.parse::<u32>().map_err(|_| eyre!("Invalid edge {}: {}", key, raw))
    };
    let source = endpoint("source")?;
    let target = endpoint("target")?;
    Ok(GmlEdge { source, target, attributes })
}

/// Parse GML text
pub fn parse_gml_str(content: &str) -> Result<GmlGraph> {
    Parser::new(content)?.graph()
}

/// Parse a GML file
pub fn parse_gml_file(path: &Path) -> Result<GmlGraph> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read GML file '{}'", path.display()))?;
    parse_gml_str(&content).wrap_err_with(|| format!("Failed to parse GML file '{}'", path.display()))
}

/// Check ids and edge references
pub fn validate_topology(graph: &GmlGraph) -> Result<(), String> {
    let mut ids = std::collections::HashSet::new();
    for node in &graph.nodes {
        if !ids.insert(node.id) {
            return Err(format!("Duplicate node ID: {}", node.id));
        }
    }
    for edge in &graph.edges {
        if !ids.contains(&edge.source) {
            return Err(format!("Edge references non-existent source node: {}", edge.source));
        }
        if !ids.contains(&edge.target) {
            return Err(format!("Edge references non-existent target node: {}", edge.target));
        }
    }
    if graph.attributes.get("directed").map(String::as_str) == Some("1") {
        warn!("GML graph is marked directed; edges are treated as undirected links");
    }
    Ok(())
}

/// Map a parsed graph to dense node indices and edge specs.
///
/// Unlabelled nodes are named `prefix` + (index + 1).
pub fn to_edge_set(graph: &GmlGraph, prefix: &str) -> Result<GmlTopology> {
    validate_topology(graph).map_err(|e| eyre!("Invalid GML topology: {}", e))?;

    let index: HashMap<u32, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id, i))
        .collect();
    let names = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| node.label.clone().unwrap_or_else(|| format!("{}{}", prefix, i + 1)))
        .collect();

    let mut edges = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        let dense = |id: u32| {
            index
                .get(&id)
                .copied()
                .ok_or_else(|| eyre!("Edge references non-existent node: {}", id))
        };
        edges.push(EdgeSpec {
            a: dense(edge.source)?,
            b: dense(edge.target)?,
            weight: edge.weight()?,
        });
    }
    Ok(GmlTopology { names, edges })
}
