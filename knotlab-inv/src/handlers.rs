use log::info;
use knotlab_link::{
    alexander_module_with, alexander_polynomial, arrow_bracket_with,
    cabled_arrow_polynomial_with, cabled_jones_polynomial_with,
    kauffman_bracket_with, knot_determinant, writhe_factor, Pd,
};
use knotlab_link::seifert::conway_polynomial;

use crate::diagram::Diagram;
use crate::error::InvariantError;
use crate::scheduler::{Context, Param, Scheduler};
use crate::table::TableQuery;
use crate::value::{Identification, Value};

type Res = Result<Value, InvariantError>;

pub fn register_defaults(s: &mut Scheduler) {
    s.register("kauffman_bracket", &[], kauffman_bracket);
    s.register("jones_poly", &[], jones_poly);
    s.register("cabled_jones_poly", &[Param::required("cables")], cabled_jones_poly);
    s.register("alexander_module", &[], alexander_module);
    s.register("alexander_poly", &[Param::optional("n", 0)], alexander_poly);
    s.register("determinant", &[], determinant);
    s.register("conway_poly", &[], conway_poly);
    s.register("arrow_bracket", &[], arrow_bracket);
    s.register("cabled_arrow_poly", &[Param::required("cables")], cabled_arrow_poly);
    s.register("linking_numbers", &[], linking_numbers);
    s.register("identify_link", &[], identify_link);
}

fn oriented(pd: &Pd) -> Result<(), InvariantError> {
    if pd.is_oriented() {
        Ok(())
    } else {
        Err(InvariantError::Unsupported("unoriented crossings".into()))
    }
}

fn classical(pd: &Pd) -> Result<(), InvariantError> {
    if pd.is_classical() {
        Ok(())
    } else {
        Err(InvariantError::Unsupported("virtual crossings".into()))
    }
}

fn cables(args: &[i64]) -> Result<usize, InvariantError> {
    match args[0] {
        n if n > 0 => Ok(n as usize),
        n => Err(InvariantError::InvalidArgs(format!("cables must be positive, got {n}.")))
    }
}

fn laurent(v: &Value) -> Result<&knotlab::Laurent, InvariantError> {
    v.as_laurent().ok_or_else(|| InvariantError::Failed(format!("expected a polynomial, got {v}.")))
}

fn kauffman_bracket(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let b = kauffman_bracket_with(d.pd(), ctx.step())?;
    Ok(b.map(Value::Laurent).unwrap_or(Value::Null))
}

fn jones_poly(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let pd = d.pd();
    if pd.is_empty() {
        return Ok(Value::Null)
    }
    oriented(pd)?;

    let b = ctx.request("kauffman_bracket", d, &[])?;
    let j = laurent(&b)? * &writhe_factor(pd.writhe());
    Ok(Value::Laurent(j.div_degrees(2)))
}

fn cabled_jones_poly(ctx: &Context<'_>, d: &Diagram, args: &[i64]) -> Res {
    let n = cables(args)?;
    let pd = d.pd();
    if !pd.is_empty() {
        oriented(pd)?;
    }
    let j = cabled_jones_polynomial_with(pd, n, ctx.step())?;
    Ok(j.map(Value::Laurent).unwrap_or(Value::Null))
}

fn alexander_module(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let pd = d.pd();
    if pd.is_empty() {
        return Ok(Value::Null)
    }
    oriented(pd)?;

    let m = alexander_module_with(pd, ctx.step())?;
    Ok(Value::Matrix(m))
}

fn alexander_poly(ctx: &Context<'_>, d: &Diagram, args: &[i64]) -> Res {
    let n = match args[0] {
        n if n >= 0 => n as usize,
        n => return Err(InvariantError::InvalidArgs(format!("n must be non-negative, got {n}.")))
    };

    let m = ctx.request("alexander_module", d, &[])?;
    let Some(m) = m.as_matrix() else {
        return Ok(Value::Null)
    };
    Ok(Value::Laurent(alexander_polynomial(m, n)))
}

fn determinant(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let a = ctx.request("alexander_poly", d, &[0])?;
    if a.is_null() {
        return Ok(Value::Null)
    }
    Ok(Value::Int(knot_determinant(laurent(&a)?)))
}

fn conway_poly(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let pd = d.pd();
    if pd.is_empty() {
        return Ok(Value::Null)
    }
    oriented(pd)?;
    classical(pd)?;
    ctx.checkpoint()?;

    match conway_polynomial(pd) {
        Some(p) => Ok(Value::Conway(p)),
        None => Ok(Value::NotApplicable)
    }
}

fn arrow_bracket(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let pd = d.pd();
    if !pd.is_empty() {
        oriented(pd)?;
    }
    let b = arrow_bracket_with(pd, ctx.step())?;
    Ok(b.map(Value::MLaurent).unwrap_or(Value::Null))
}

fn cabled_arrow_poly(ctx: &Context<'_>, d: &Diagram, args: &[i64]) -> Res {
    let n = cables(args)?;
    let pd = d.pd();
    if !pd.is_empty() {
        oriented(pd)?;
    }
    let p = cabled_arrow_polynomial_with(pd, n, ctx.step())?;
    Ok(p.map(Value::MLaurent).unwrap_or(Value::Null))
}

fn linking_numbers(_: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let g = d.graph();
    if g.is_empty() {
        return Ok(Value::Null)
    }
    Ok(Value::LinkingNumbers(g.linking_numbers()))
}

fn identify_link(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Res {
    let Some(table) = ctx.table() else {
        return Err(InvariantError::Unsupported("no knot table.".into()))
    };

    let pd = d.pd();
    if pd.is_empty() {
        return Ok(Value::Null)
    }
    classical(pd)?;

    let jones = ctx.request("jones_poly", d, &[])?;
    let alexander = ctx.request("alexander_poly", d, &[0])?;

    let query = TableQuery {
        components: pd.components().len(),
        crossings: pd.crossing_num(),
        jones: laurent(&jones)?.clone(),
        alexander: laurent(&alexander)?.clone(),
    };
    let res = table.get_knots(&query);

    info!("identified {} candidates (incomplete: {}).", res.knots.len(), res.incomplete);

    Ok(Value::Identification(Identification {
        names: res.knots,
        incomplete: res.incomplete
    }))
}
