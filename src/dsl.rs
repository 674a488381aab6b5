use crate::variable::{Variable, VariableKey};

/// Rule premise: `var.is(term)` propositions joined with `and` / `or`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    /// Every `(variable, term)` the expression mentions, left to right.
    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        parse(self, &mut props);

        props
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

#[test]
fn test_flattening() {
    use slotmap::SlotMap;

    let mut keys = SlotMap::<VariableKey, ()>::with_key();
    let a = keys.insert(());
    let b = keys.insert(());

    let expr = Expr::Is(a, 1).and(Expr::Is(b, 2)).and(Expr::Is(a, 3));

    assert_eq!(expr, Expr::And(vec![Expr::Is(a, 1), Expr::Is(b, 2), Expr::Is(a, 3)]));

    let expr = Expr::Is(a, 1).and(Expr::Is(b, 2)).or(Expr::Is(b, 4));

    assert_eq!(
        expr,
        Expr::Or(vec![Expr::And(vec![Expr::Is(a, 1), Expr::Is(b, 2)]), Expr::Is(b, 4)])
    );
    assert_eq!(expr.propositions(), vec![(a, &1), (b, &2), (b, &4)]);
}
