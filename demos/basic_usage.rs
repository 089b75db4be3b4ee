// ============================================================================
// Basic Usage Example
// ============================================================================

use num_bigint::BigInt;
use num_rational::BigRational;
use precision_domain::prelude::*;

fn main() -> DomainResult<()> {
    println!("=== Precision Domain Example ===\n");

    // Double precision with the derived tolerance 100 * 2^-52
    let ctx = PrecisionContext::new(ContextConfig::double())?;
    println!("Context:         {:?}", ctx);
    println!("Tolerance:       {}", ctx.tolerance_scalar());
    println!("Max denominator: {:?}\n", ctx.max_denominator());

    // Noise below the tolerance never survives a write
    println!("=== Snapping ===");
    for text in ["1e-20", "1e-10", "0.1"] {
        println!("  {:>8} -> {}", text, ctx.convert(text)?);
    }

    let noise = &(&ctx.convert_real("0.1")? * &ctx.convert_real(3)?) - &ctx.convert_real("0.3")?;
    println!("  0.1 * 3 - 0.3 -> {}", noise);

    // Rational reconstruction
    println!("\n=== Reconstruction ===");
    let third = ctx.convert_real(BigRational::new(BigInt::from(1), BigInt::from(3)))?;
    println!("  1/3 stored as    {}", third);
    println!("  exact value      {}", ctx.to_rational(&third, false)?);
    println!("  reconstructed    {}", ctx.to_rational(&third, true)?);

    let pi = ctx.pi();
    for bound in [10, 100, 1000] {
        let exact = ctx.to_rational(&pi, false)?;
        let limited = limit_denominator(&exact, &BigInt::from(bound));
        println!("  pi with q <= {:<5} {}", bound, limited);
    }

    // Approximate equality
    println!("\n=== Approximate Equality ===");
    let one = ctx.convert("1.0")?;
    for other in ["1.00000000000001", "1.001"] {
        println!("  1.0 ~ {:<18} {}", other, ctx.almost_eq(&one, other)?);
    }

    // Complex values snap each component on its own
    println!("\n=== Complex Values ===");
    let z = ctx.convert(num_complex::Complex64::new(1e-20, 2.0))?;
    println!("  1e-20 + 2j -> {}", z);

    // A wider context keeps what the double context discards
    println!("\n=== Changing Precision ===");
    let quad = ctx.with_precision(113)?;
    println!("  quad tolerance  {}", quad.tolerance_scalar());
    println!("  1e-20 in quad   {}", quad.convert("1e-20")?);
    println!("  1e-20 in double {}", ctx.convert("1e-20")?);

    println!("\n=== Example Complete ===");
    Ok(())
}
