use serde::Deserialize;

/// AST 的根节点, 远端 query-assist 服务对一条查询串的解析结果
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchAst {
    /// 顶层表达式; 空查询时服务端可能完全省略该字段
    #[serde(default)]
    pub expression: Option<Expression>,
}

impl SearchAst {
    /// 从服务端返回的 JSON 文本解码 AST
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// 尚未拿到服务端解析结果时使用的兜底 AST (纯文本编辑场景)
    pub fn empty() -> Self {
        Self {
            expression: Some(Expression::TermExpression { terms: Vec::new() }),
        }
    }
}

/// 表达式节点: 一组平铺的 term, 或一个二元逻辑节点
///
/// 服务端通过 `$type` 字段区分节点类型, 语法可能先于客户端演进,
/// 未知类型解码为 [`Expression::Unknown`] 而不是报错
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "$type")]
pub enum Expression {
    TermExpression {
        #[serde(default)]
        terms: Vec<Term>,
    },
    LogicExpression {
        operator: LogicOperator,
        #[serde(default)]
        left: Option<Box<Expression>>,
        #[serde(default)]
        right: Option<Box<Expression>>,
    },
    #[serde(other)]
    Unknown,
}

/// 逻辑运算符; 展平的编辑模型只关心 OR 与其他的区别
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum LogicOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    /// 客户端尚未学习到的运算符
    #[serde(untagged)]
    Other(String),
}

/// 查询中的一个原子子句
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "$type")]
pub enum Term {
    /// 裸标签子句, 例如 `#Bug` / `-customer`
    AloneValueSearchTerm {
        value: SearchValue,
        #[serde(default)]
        minus: bool,
    },
    /// 字段限定子句, 例如 `project: {Demo project}, HELP`
    CategorizedSearchTerm {
        field: SearchField,
        #[serde(default)]
        values: Vec<TermValue>,
    },
    /// 自由文本子句
    TextSearchTerm {
        #[serde(default)]
        text: String,
        #[serde(default)]
        minus: bool,
    },
    #[serde(other)]
    Unknown,
}

/// 字段限定子句中的单个值
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "$type")]
pub enum TermValue {
    AttributeSearchValue {
        value: SearchValue,
        #[serde(default)]
        minus: bool,
    },
    /// 区间值, 例如 `2020-01 .. 2020-06`
    RangeSearchValue {
        left: SearchValue,
        right: SearchValue,
        #[serde(default)]
        minus: bool,
    },
    #[serde(other)]
    Unknown,
}

/// 查询字段引用; 服务端还会携带 start/stop/filterFields 等定位信息,
/// 编辑模型只需要名称, 其余字段在解码时忽略
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchField {
    pub name: String,
}

/// 命名的查询值
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchValue {
    pub name: String,
}
