/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    /// `1+2 = 3`
    /// etc.
    CombineLikeTerms,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `2*3 = 6`
    /// `2*(1/4) = 1/2`
    CombineNumbers,

    /// `a*a = a^2`
    /// `a^2*a^3 = a^5`
    /// `2^(1/2)*3^(1/2) = 6^(1/2)`
    /// etc.
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`, for positive `a`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`, for integer `c`
    PowerPower,

    /// `2^3 = 8`
    /// `(2/3)^-2 = 9/4`
    EvaluatePower,

    /// `8^(1/2) = 2*2^(1/2)`
    /// `2^(3/2) = 2*2^(1/2)`
    ExtractRoot,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c*b^c`, for integer `c`
    DistributePower,

    /// `sin(x)` at a multiple of `pi`
    Sin,

    /// `cos(x)` at a multiple of `pi`
    Cos,

    /// `tan(x)` at a multiple of `pi`
    Tan,

    /// `log(1) = 0`
    /// `log(E) = 1`
    Log,

    /// `exp(0) = 1`
    /// `exp(log(a)) = a`
    Exp,

    /// `abs(-3) = 3`
    Abs,

    /// `3! = 6`
    Factorial,

    /// `(x^2-1)/(x-1) = x+1`
    CancelPolynomial,
}
