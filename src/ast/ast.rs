use std::fmt::{Display, Formatter, Result};

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, GetAttrExpr, LogicalExpr, SetAttrExpr,
        SuperGetAttrExpr, UnaryExpr,
    },
    statements::{
        BlockStmt, ClassDecl, ExpressionStmt, FunctionDecl, IfStmt, MethodDecl, PrintStmt,
        ReturnStmt, VarDecl, WhileStmt,
    },
};

/// A name as written in the source, not yet resolved to any scope.
pub type Identifier = String;

/// Root of a parsed source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassDecl),
    Function(FunctionDecl),
    Var(VarDecl),
    Stmt(Stmt),
}

/// Statement kinds. There is no `for` node: loops reach the AST as `While`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Print(PrintStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assign(AssignmentExpr),
    SetAttr(SetAttrExpr),
    Or(LogicalExpr),
    And(LogicalExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    GetAttr(GetAttrExpr),
    SuperGetAttr(SuperGetAttrExpr),
    Number(f64),
    Bool(bool),
    String(String),
    Nil,
    Var(Identifier),
    This,
}

impl From<Stmt> for Declaration {
    fn from(stmt: Stmt) -> Self {
        Declaration::Stmt(stmt)
    }
}

impl From<Expr> for Stmt {
    fn from(expression: Expr) -> Self {
        Stmt::Expression(ExpressionStmt { expression })
    }
}

// Everything below prints the tree in a parenthesized prefix form, e.g.
// `(while (< i 3) (block (print i)))`.

fn write_params(f: &mut Formatter<'_>, params: &[Identifier]) -> Result {
    write!(f, "({})", params.join(" "))
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (index, declaration) in self.declarations.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", declaration)?;
        }
        Ok(())
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Declaration::Class(class) => write!(f, "{}", class),
            Declaration::Function(function) => write!(f, "{}", function),
            Declaration::Var(var) => write!(f, "{}", var),
            Declaration::Stmt(stmt) => write!(f, "{}", stmt),
        }
    }
}

impl Display for ClassDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(class {}", self.name)?;
        if let Some(superclass) = &self.superclass {
            write!(f, " (< {})", superclass)?;
        }
        for method in &self.methods {
            write!(f, " {}", method)?;
        }
        write!(f, ")")
    }
}

impl Display for MethodDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(method {} ", self.name)?;
        write_params(f, &self.params)?;
        write!(f, " {})", self.body)
    }
}

impl Display for FunctionDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(fun {} ", self.name)?;
        write_params(f, &self.params)?;
        write!(f, " {})", self.body)
    }
}

impl Display for VarDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.initializer {
            Some(initializer) => write!(f, "(var {} {})", self.name, initializer),
            None => write!(f, "(var {})", self.name),
        }
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(block")?;
        for declaration in self.iter() {
            write!(f, " {}", declaration)?;
        }
        write!(f, ")")
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::Expression(stmt) => write!(f, "(expr {})", stmt.expression),
            Stmt::Print(stmt) => write!(f, "(print {})", stmt.expression),
            Stmt::Block(block) => write!(f, "{}", block),
            Stmt::If(stmt) => write!(
                f,
                "(if {} {} {})",
                stmt.condition, stmt.then_branch, stmt.else_branch
            ),
            Stmt::While(stmt) => write!(f, "(while {} {})", stmt.condition, stmt.body),
            Stmt::Return(ReturnStmt { value: Some(value) }) => write!(f, "(return {})", value),
            Stmt::Return(ReturnStmt { value: None }) => write!(f, "(return)"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Assign(assign) => write!(f, "(= {} {})", assign.target, assign.value),
            Expr::SetAttr(set) => write!(f, "(= (. {} {}) {})", set.object, set.name, set.value),
            Expr::Or(logical) => write!(f, "(or {} {})", logical.left, logical.right),
            Expr::And(logical) => write!(f, "(and {} {})", logical.left, logical.right),
            Expr::Binary(binary) => {
                write!(f, "({} {} {})", binary.operator, binary.left, binary.right)
            }
            Expr::Unary(unary) => write!(f, "({} {})", unary.operator, unary.operand),
            Expr::Call(call) => {
                write!(f, "(call {}", call.callee)?;
                for argument in &call.arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Expr::GetAttr(get) => write!(f, "(. {} {})", get.object, get.name),
            Expr::SuperGetAttr(get) => write!(f, "(. super {})", get.name),
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Bool(value) => write!(f, "{}", value),
            Expr::String(value) => write!(f, "\"{}\"", value),
            Expr::Nil => write!(f, "nil"),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::This => write!(f, "this"),
        }
    }
}
