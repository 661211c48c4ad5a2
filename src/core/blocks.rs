//! Wire representation of Notion blocks and the builders that produce them.
//!
//! `BlockContent` serializes to the payload keyed by block kind, which is the
//! body of a block update (`{"code": {"rich_text": [...]}}`). `Block` wraps the
//! same content in the envelope required when appending children.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RichText {
    Text {
        content: String,
        link: Option<Link>,
    },
    Mention {
        page: PageRef,
    },
}

#[cfg(test)]
impl RichText {
    pub fn plain_text(&self) -> &str {
        match self {
            RichText::Text { content, .. } => content,
            RichText::Mention { .. } => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPayload {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToDoPayload {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquationPayload {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRowPayload {
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContent {
    Paragraph(TextPayload),
    #[serde(rename = "heading_2")]
    Heading2(TextPayload),
    ToDo(ToDoPayload),
    Callout(TextPayload),
    Code(TextPayload),
    Equation(EquationPayload),
    TableRow(TableRowPayload),
}

impl BlockContent {
    pub fn kind(&self) -> &'static str {
        match self {
            BlockContent::Paragraph(_) => "paragraph",
            BlockContent::Heading2(_) => "heading_2",
            BlockContent::ToDo(_) => "to_do",
            BlockContent::Callout(_) => "callout",
            BlockContent::Code(_) => "code",
            BlockContent::Equation(_) => "equation",
            BlockContent::TableRow(_) => "table_row",
        }
    }

    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        fn join(spans: &[RichText]) -> String {
            spans.iter().map(RichText::plain_text).collect()
        }

        match self {
            BlockContent::Paragraph(p)
            | BlockContent::Heading2(p)
            | BlockContent::Callout(p)
            | BlockContent::Code(p) => join(&p.rich_text),
            BlockContent::ToDo(t) => join(&t.rich_text),
            BlockContent::Equation(e) => e.expression.clone(),
            BlockContent::TableRow(r) => r
                .cells
                .iter()
                .map(|c| join(c))
                .collect::<Vec<_>>()
                .join("\t"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    object: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl From<BlockContent> for Block {
    fn from(content: BlockContent) -> Self {
        Block {
            object: "block",
            kind: content.kind(),
            content,
        }
    }
}

pub fn rich_text(content: &str, link: Option<&str>) -> RichText {
    RichText::Text {
        content: content.to_string(),
        link: link.map(|url| Link {
            url: url.to_string(),
        }),
    }
}

pub fn page_mention(page_id: &str) -> RichText {
    RichText::Mention {
        page: PageRef {
            id: page_id.to_string(),
        },
    }
}

fn text_payload(content: &str, link: Option<&str>) -> TextPayload {
    TextPayload {
        rich_text: vec![rich_text(content, link)],
    }
}

pub fn paragraph(content: &str, link: Option<&str>) -> BlockContent {
    BlockContent::Paragraph(text_payload(content, link))
}

pub fn heading(content: &str) -> BlockContent {
    BlockContent::Heading2(text_payload(content, None))
}

pub fn to_do(content: &str) -> BlockContent {
    BlockContent::ToDo(ToDoPayload {
        rich_text: vec![rich_text(content, None)],
        checked: false,
    })
}

pub fn callout(page_id: &str) -> BlockContent {
    BlockContent::Callout(TextPayload {
        rich_text: vec![page_mention(page_id)],
    })
}

pub fn code(content: &str) -> BlockContent {
    BlockContent::Code(text_payload(content, None))
}

pub fn equation(expression: &str) -> BlockContent {
    BlockContent::Equation(EquationPayload {
        expression: expression.to_string(),
    })
}

pub fn table_row<S: AsRef<str>>(cells: &[S]) -> BlockContent {
    BlockContent::TableRow(TableRowPayload {
        cells: cells
            .iter()
            .map(|c| vec![rich_text(c.as_ref(), None)])
            .collect(),
    })
}
