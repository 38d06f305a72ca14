use toygrad::prelude::*;

fn main() -> Result<(), toygrad::Error> {
    let x = Dual::variable(3.0); // x = 3.0
    let y = Dual::constant(4.0); // y = 4.0

    let z = x * y; // z = x * y = 12.0
    println!("z = {}", z.real); // 12.0
    println!("dz/dx = {}", z.tangent); // 4.0

    let f = Function::new(["x", "y"], |[x, y]| x.pow(2.0) / y.pow(2.0));
    println!("df/dx at (2, 3) = {}", gradient(&f, Some("x"), [2.0, 3.0])?); // 4/9
    println!("df/dy at (2, 3) = {}", gradient(&f, Some("y"), [2.0, 3.0])?); // -8/27

    for (name, partial) in grad(&f, &[("x", 2.0), ("y", 3.0)])?.iter() {
        println!("∂f/∂{name} = {partial}");
    }
    Ok(())
}
