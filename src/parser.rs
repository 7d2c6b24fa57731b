//! 查询 AST 的遍历器: 把服务端语法树展平为可编辑的结构化模型
//!
//! ## 遍历流程图
//!
//! ```text
//! QueryParser::new(query, ast)
//!   └─ QueryBuilder::walk(expression)
//!        ├─ TermExpression → 按顺序分发每个 term
//!        │    ├─ AloneValueSearchTerm → singles 追加 {name, negative}
//!        │    ├─ CategorizedSearchTerm → 按字段名查找或新建 PairTerm (忽略大小写)
//!        │    │    ├─ AttributeSearchValue → add_value(name, minus, no_wrap=false)
//!        │    │    ├─ RangeSearchValue → add_value("left .. right", minus, no_wrap=true)
//!        │    │    └─ 其他 → 跳过
//!        │    ├─ TextSearchTerm → 暂存 text.trim(), 收尾时用空格拼接
//!        │    └─ 其他 → 跳过
//!        └─ LogicExpression
//!             ├─ operator == OR → 置位 unsupported_complexity (单向, 不复位)
//!             └─ 不论运算符, 先递归 left 再递归 right,
//!                两侧的 term 合并进同一组平铺集合
//! ```
//!
//! ## 保证
//!
//! 遍历对任何输入都不会失败: 缺失的表达式和未知的节点类型都退化为
//! 更小的部分结果, 因为 AST 的语法由远端服务拥有, 可能先于客户端演进。

use crate::ast::{Expression, LogicOperator, SearchAst, Term, TermValue};
use crate::compiler;
use crate::model::{PairTerm, PairValue, ParsedQuery, SingleTerm};

/// 一次 (查询串, AST) 解析的结果载体
///
/// 遍历在构造时同步完成, 之后结果只读; 每拿到一棵新 AST
/// 就构造一个新实例, 不支持跨 AST 的增量修改
pub struct QueryParser {
    query: String,
    result: ParsedQuery,
}

impl QueryParser {
    pub fn new(query: impl Into<String>, ast: Option<&SearchAst>) -> Self {
        let mut builder = QueryBuilder::default();

        if let Some(expression) = ast.and_then(|ast| ast.expression.as_ref()) {
            builder.walk(expression);
        }

        Self {
            query: query.into(),
            result: builder.finish(),
        }
    }

    /// 构造时传入的原始查询串
    pub fn source_query(&self) -> &str {
        &self.query
    }

    /// 遍历产出的不可变结构化模型
    pub fn result(&self) -> &ParsedQuery {
        &self.result
    }

    /// 取出结构化模型, 消费解析器
    pub fn into_result(self) -> ParsedQuery {
        self.result
    }

    /// 把当前模型重新序列化为后端认可的规范查询文本
    pub fn compile(&self) -> String {
        compiler::compile(&self.result)
    }

    /// 读取某字段当前选中的值, 供字段值编辑器使用
    pub fn field_values(&self, field: &str) -> Vec<String> {
        self.result.field_values(field)
    }
}

/// 遍历过程中的增量累加器
///
/// 只在 [`QueryParser::new`] 内部存在, 收尾后固化为 [`ParsedQuery`],
/// 可变集合不会泄漏给读取结果的 UI 代码
#[derive(Default)]
struct QueryBuilder {
    pairs: Vec<PairTerm>,
    singles: Vec<SingleTerm>,
    text_pieces: Vec<String>,
    unsupported_complexity: bool,
}

impl QueryBuilder {
    /// 递归遍历表达式树
    ///
    /// AND 的两侧与 OR 的两侧同样被合并进平铺集合, 首个 OR 以下的
    /// 布尔结构不做恢复; OR 仅通过 unsupported_complexity 暴露给调用方
    fn walk(&mut self, expression: &Expression) {
        match expression {
            Expression::TermExpression { terms } => {
                for term in terms {
                    self.visit_term(term);
                }
            }
            Expression::LogicExpression {
                operator,
                left,
                right,
            } => {
                if matches!(operator, LogicOperator::Or) {
                    self.unsupported_complexity = true;
                }
                if let Some(left) = left {
                    self.walk(left);
                }
                if let Some(right) = right {
                    self.walk(right);
                }
            }
            Expression::Unknown => {}
        }
    }

    fn visit_term(&mut self, term: &Term) {
        match term {
            Term::AloneValueSearchTerm { value, minus } => {
                // singles 保留出现顺序, 且刻意不去重
                self.singles.push(SingleTerm {
                    name: value.name.clone(),
                    negative: *minus,
                });
            }
            Term::CategorizedSearchTerm { field, values } => {
                let pair = self.pair_for_field(&field.name);
                for term_value in values {
                    match term_value {
                        TermValue::AttributeSearchValue { value, minus } => {
                            add_value(pair, value.name.clone(), *minus, false);
                        }
                        TermValue::RangeSearchValue { left, right, minus } => {
                            add_value(
                                pair,
                                format!("{} .. {}", left.name, right.name),
                                *minus,
                                true,
                            );
                        }
                        TermValue::Unknown => {}
                    }
                }
            }
            Term::TextSearchTerm { text, .. } => {
                self.text_pieces.push(text.trim().to_string());
            }
            Term::Unknown => {}
        }
    }

    /// 按字段名查找已有的 PairTerm (忽略大小写), 不存在则在末尾新建
    fn pair_for_field(&mut self, field_name: &str) -> &mut PairTerm {
        let index = self
            .pairs
            .iter()
            .position(|pair| pair.name.to_lowercase() == field_name.to_lowercase());

        let index = match index {
            Some(index) => index,
            None => {
                self.pairs.push(PairTerm {
                    name: field_name.to_string(),
                    values: Vec::new(),
                });
                self.pairs.len() - 1
            }
        };

        &mut self.pairs[index]
    }

    /// 收尾: 拼接文本缓冲并固化为不可变结果
    fn finish(self) -> ParsedQuery {
        ParsedQuery {
            pairs: self.pairs,
            singles: self.singles,
            text: self.text_pieces.join(" "),
            unsupported_complexity: self.unsupported_complexity,
        }
    }
}

/// 向 PairTerm 追加一个值, 名称按忽略大小写去重
///
/// 取反冲突的消解是单向的: 已记录为取反的值遇到后续的非取反出现时
/// 原地清除取反标记; 非取反的值不会被后续的取反出现翻转, 这类重复
/// 直接丢弃
fn add_value(pair: &mut PairTerm, name: String, negative: bool, no_wrap: bool) {
    let existing = pair
        .values
        .iter_mut()
        .find(|value| value.name.to_lowercase() == name.to_lowercase());

    if let Some(existing) = existing {
        if existing.negative && !negative {
            existing.negative = false;
        }
        return;
    }

    pair.values.push(PairValue {
        name,
        negative,
        no_wrap,
    });
}
