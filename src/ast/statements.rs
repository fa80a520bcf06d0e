use std::slice::Iter;

use super::ast::{Declaration, Expr, Identifier, Stmt};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStmt {
    pub declarations: Vec<Declaration>,
}

impl BlockStmt {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        BlockStmt { declarations }
    }

    pub fn iter(&self) -> Iter<'_, Declaration> {
        self.declarations.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expression: Expr,
}

/// Conditional statement.
///
/// A missing `else` is stored as an empty block, never as an absent branch.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Box<Stmt>,
}

/// The only loop node; `for` loops are rewritten into it while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// `value` is `None` for a bare `return;`, which returns nil.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}

/// `initializer` is `None` when the variable starts out uninitialized.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Identifier,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: BlockStmt,
}

/// Class declaration. The superclass is referenced by name only.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Identifier,
    pub superclass: Option<Identifier>,
    pub methods: Vec<MethodDecl>,
}
