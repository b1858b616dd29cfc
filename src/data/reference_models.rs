//! Column structures of the Phoenix reference models.
//!
//! All tables share the same 64-point optical depth column, where the first
//! point is the surface (τ = 0) and the remaining points are log-uniform
//! between 10^-6 and 10^2. Temperatures are in K and pressures in dyn/cm^2.

/// Number of depth points in each reference table.
pub const NUM_REFERENCE_DEPTHS: usize = 64;

/// Effective temperature of the solar reference model [K].
pub const SUN_TEFF: f64 = 5777.0;
/// Base 10 logarithm of the surface gravity of the solar reference model.
pub const SUN_LOG_G: f64 = 4.44;

/// Effective temperature of the cool reference model [K].
pub const COOL_TEFF: f64 = 5000.0;
/// Base 10 logarithm of the surface gravity of the cool reference model.
pub const COOL_LOG_G: f64 = 4.5;

/// Effective temperature of the hot reference model [K].
pub const HOT_TEFF: f64 = 10000.0;
/// Base 10 logarithm of the surface gravity of the hot reference model.
pub const HOT_LOG_G: f64 = 4.0;

/// Helium abundance of the cool and hot reference models on the A12 scale.
pub const REFERENCE_HELIUM_ABUNDANCE: f64 = 10.93;

pub static REFERENCE_TAU: [f64; NUM_REFERENCE_DEPTHS] = [
    0.00000000e+00, 1.00000000e-06, 1.34596032e-06,
    1.81160919e-06, 2.43835410e-06, 3.28192787e-06,
    4.41734470e-06, 5.94557071e-06, 8.00250228e-06,
    1.07710506e-05, 1.44974067e-05, 1.95129342e-05,
    2.62636353e-05, 3.53498111e-05, 4.75794431e-05,
    6.40400427e-05, 8.61953566e-05, 1.16015530e-04,
    1.56152301e-04, 2.10174801e-04, 2.82886943e-04,
    3.80754602e-04, 5.12480588e-04, 6.89778538e-04,
    9.28414545e-04, 1.24960914e-03, 1.68192432e-03,
    2.26380341e-03, 3.04698957e-03, 4.10112707e-03,
    5.51995432e-03, 7.42963951e-03, 1.00000000e-02,
    1.34596032e-02, 1.81160919e-02, 2.43835410e-02,
    3.28192787e-02, 4.41734470e-02, 5.94557071e-02,
    8.00250228e-02, 1.07710506e-01, 1.44974067e-01,
    1.95129342e-01, 2.62636353e-01, 3.53498111e-01,
    4.75794431e-01, 6.40400427e-01, 8.61953566e-01,
    1.16015530e+00, 1.56152301e+00, 2.10174801e+00,
    2.82886943e+00, 3.80754602e+00, 5.12480588e+00,
    6.89778538e+00, 9.28414545e+00, 1.24960914e+01,
    1.68192432e+01, 2.26380341e+01, 3.04698957e+01,
    4.10112707e+01, 5.51995432e+01, 7.42963951e+01,
    1.00000000e+02,
];

pub static SUN_TEMPERATURE: [f64; NUM_REFERENCE_DEPTHS] = [
    3.75778887e+03, 3.75778887e+03, 3.78480175e+03,
    3.81385433e+03, 3.84360131e+03, 3.87340585e+03,
    3.90300184e+03, 3.93231689e+03, 3.96137920e+03,
    3.99027119e+03, 4.01910484e+03, 4.04798292e+03,
    4.07699549e+03, 4.10623218e+03, 4.13574365e+03,
    4.16548101e+03, 4.19541372e+03, 4.22551122e+03,
    4.25571229e+03, 4.28594189e+03, 4.31613169e+03,
    4.34620698e+03, 4.37603328e+03, 4.40564395e+03,
    4.43507741e+03, 4.46439148e+03, 4.49375530e+03,
    4.52341166e+03, 4.55357282e+03, 4.58446080e+03,
    4.61663974e+03, 4.65052342e+03, 4.68623382e+03,
    4.72408924e+03, 4.76494152e+03, 4.80984310e+03,
    4.85897779e+03, 4.91315894e+03, 4.97390462e+03,
    5.04531168e+03, 5.12680296e+03, 5.22061204e+03,
    5.32918534e+03, 5.46202432e+03, 5.61966783e+03,
    5.80986721e+03, 6.03911829e+03, 6.23433005e+03,
    6.53458312e+03, 6.87429104e+03, 7.29999982e+03,
    7.66682942e+03, 7.94223816e+03, 8.16133659e+03,
    8.35020014e+03, 8.52047274e+03, 8.67812136e+03,
    8.82687569e+03, 8.96926539e+03, 9.10706360e+03,
    9.24154122e+03, 9.37363001e+03, 9.50427569e+03,
    9.63219703e+03,
];

pub static SUN_GAS_PRESSURE: [f64; NUM_REFERENCE_DEPTHS] = [
    1.00000000e-04, 7.28828683e+01, 8.61732127e+01,
    1.01843642e+02, 1.20317369e+02, 1.42093296e+02,
    1.67758728e+02, 1.98004769e+02, 2.33644726e+02,
    2.75635953e+02, 3.25104809e+02, 3.83378881e+02,
    4.52022444e+02, 5.32877321e+02, 6.28113129e+02,
    7.40284570e+02, 8.72399144e+02, 1.02799724e+03,
    1.21124572e+03, 1.42704757e+03, 1.68117133e+03,
    1.98040330e+03, 2.33272402e+03, 2.74752261e+03,
    3.23584954e+03, 3.81071167e+03, 4.48742481e+03,
    5.28403135e+03, 6.22178479e+03, 7.32571484e+03,
    8.62531818e+03, 1.01553497e+04, 1.19567105e+04,
    1.40775115e+04, 1.65743703e+04, 1.95139034e+04,
    2.29742654e+04, 2.70468753e+04, 3.18381441e+04,
    3.74704749e+04, 4.40799662e+04, 5.18080650e+04,
    6.07793648e+04, 7.10351288e+04, 8.24259774e+04,
    9.44866985e+04, 1.06329924e+05, 1.17862219e+05,
    1.28295128e+05, 1.36933948e+05, 1.43493910e+05,
    1.48487689e+05, 1.52795575e+05, 1.56932490e+05,
    1.61140965e+05, 1.65564071e+05, 1.70312555e+05,
    1.75486986e+05, 1.81187219e+05, 1.87518050e+05,
    1.94593474e+05, 2.02540390e+05, 2.11500759e+05,
    2.21643078e+05,
];

pub static SUN_ELECTRON_PRESSURE: [f64; NUM_REFERENCE_DEPTHS] = [
    1.53086468e-07, 5.66518458e-03, 6.72808434e-03,
    8.00271553e-03, 9.51809763e-03, 1.13117439e-02,
    1.34299757e-02, 1.59287848e-02, 1.88751877e-02,
    2.23491173e-02, 2.64457687e-02, 3.12779351e-02,
    3.69791374e-02, 4.37078139e-02, 5.16503830e-02,
    6.10221574e-02, 7.20768506e-02, 8.51123959e-02,
    1.00475763e-01, 1.18571139e-01, 1.39870552e-01,
    1.64923053e-01, 1.94357064e-01, 2.28928720e-01,
    2.69525262e-01, 3.17192229e-01, 3.73192988e-01,
    4.39058414e-01, 5.16615874e-01, 6.08066527e-01,
    7.16264581e-01, 8.44657163e-01, 9.97267453e-01,
    1.17915717e+00, 1.39715732e+00, 1.66026826e+00,
    1.97886824e+00, 2.36716912e+00, 2.84540916e+00,
    3.44853014e+00, 4.21529199e+00, 5.21488490e+00,
    6.56660006e+00, 8.55643060e+00, 1.16931724e+01,
    1.71629079e+01, 2.75152019e+01, 4.18720695e+01,
    7.66283674e+01, 1.45995187e+02, 3.04766672e+02,
    5.44151865e+02, 8.17181982e+02, 1.11216223e+03,
    1.43633936e+03, 1.79603721e+03, 2.19692609e+03,
    2.64548746e+03, 3.14931731e+03, 3.71721361e+03,
    4.35932066e+03, 5.08736400e+03, 5.91634943e+03,
    6.85104525e+03,
];

pub static COOL_TEMPERATURE: [f64; NUM_REFERENCE_DEPTHS] = [
    3.15213573e+03, 3.15213573e+03, 3.17988622e+03,
    3.21012887e+03, 3.24126626e+03, 3.27276079e+03,
    3.30435726e+03, 3.33589186e+03, 3.36724152e+03,
    3.39831714e+03, 3.42906935e+03, 3.45949368e+03,
    3.48962758e+03, 3.51953743e+03, 3.54929791e+03,
    3.57896962e+03, 3.60858206e+03, 3.63812647e+03,
    3.66755984e+03, 3.69681906e+03, 3.72583932e+03,
    3.75457007e+03, 3.78298373e+03, 3.81109105e+03,
    3.83893073e+03, 3.86656356e+03, 3.89408060e+03,
    3.92160316e+03, 3.94927226e+03, 3.97726285e+03,
    4.00584848e+03, 4.03531360e+03, 4.06591896e+03,
    4.09802861e+03, 4.13221208e+03, 4.16915228e+03,
    4.20937593e+03, 4.25369220e+03, 4.30330740e+03,
    4.36035871e+03, 4.42601579e+03, 4.50281615e+03,
    4.59386420e+03, 4.70448179e+03, 4.83727710e+03,
    4.99516189e+03, 5.19102133e+03, 5.40505224e+03,
    5.67247303e+03, 5.95695843e+03, 6.27957483e+03,
    6.71365961e+03, 7.06828382e+03, 7.34157937e+03,
    7.56939939e+03, 7.77138428e+03, 7.95656001e+03,
    8.13006722e+03, 8.29523536e+03, 8.45429779e+03,
    8.60879260e+03, 8.75981714e+03, 8.90838142e+03,
    9.05361290e+03,
];

pub static COOL_GAS_PRESSURE: [f64; NUM_REFERENCE_DEPTHS] = [
    1.00000000e-04, 1.03770218e+02, 1.24242770e+02,
    1.47686629e+02, 1.74578855e+02, 2.05506972e+02,
    2.41168221e+02, 2.82385082e+02, 3.30127686e+02,
    3.85540774e+02, 4.49974447e+02, 5.25018680e+02,
    6.12542265e+02, 7.14737800e+02, 8.34175244e+02,
    9.73867213e+02, 1.13734974e+03, 1.32878149e+03,
    1.55306409e+03, 1.81598529e+03, 2.12438619e+03,
    2.48635477e+03, 2.91145035e+03, 3.41095943e+03,
    3.99819276e+03, 4.68883438e+03, 5.50134311e+03,
    6.45741052e+03, 7.58249196e+03, 8.90641249e+03,
    1.04639741e+04, 1.22956503e+04, 1.44484788e+04,
    1.69769301e+04, 1.99435622e+04, 2.34195797e+04,
    2.74860930e+04, 3.22351126e+04, 3.77699104e+04,
    4.42033085e+04, 5.16616495e+04, 6.02879692e+04,
    7.02475219e+04, 8.17365048e+04, 9.50146490e+04,
    1.10441316e+05, 1.28451318e+05, 1.49415614e+05,
    1.72877372e+05, 1.96852853e+05, 2.18808320e+05,
    2.35794833e+05, 2.48716042e+05, 2.59902151e+05,
    2.70560370e+05, 2.81251297e+05, 2.92310802e+05,
    3.03988239e+05, 3.16495216e+05, 3.30029076e+05,
    3.44786944e+05, 3.60975298e+05, 3.78815092e+05,
    3.98560550e+05,
];

pub static COOL_ELECTRON_PRESSURE: [f64; NUM_REFERENCE_DEPTHS] = [
    1.17858428e-08, 1.73073838e-03, 2.13762360e-03,
    2.64586146e-03, 3.26749020e-03, 4.02219946e-03,
    4.93454748e-03, 6.03357965e-03, 7.35319803e-03,
    8.93306098e-03, 1.08200092e-02, 1.30700158e-02,
    1.57505131e-02, 1.89428594e-02, 2.27446519e-02,
    2.72716962e-02, 3.26596928e-02, 3.90659174e-02,
    4.66713907e-02, 5.56843087e-02, 6.63452384e-02,
    7.89341910e-02, 9.37792910e-02, 1.11270187e-01,
    1.31870014e-01, 1.56130489e-01, 1.84715397e-01,
    2.18428767e-01, 2.58245610e-01, 3.05363622e-01,
    3.61311334e-01, 4.27990545e-01, 5.07743854e-01,
    6.03604040e-01, 7.19674246e-01, 8.61422067e-01,
    1.03568172e+00, 1.25187413e+00, 1.52336997e+00,
    1.87078030e+00, 2.31893414e+00, 2.90597658e+00,
    3.68566482e+00, 4.74110273e+00, 6.16546324e+00,
    8.08486709e+00, 1.07959797e+01, 1.46390000e+01,
    2.17273927e+01, 3.56194059e+01, 6.57361653e+01,
    1.48468955e+02, 2.80489497e+02, 4.46587250e+02,
    6.46784312e+02, 8.86744838e+02, 1.17244961e+03,
    1.51089749e+03, 1.91050958e+03, 2.38115682e+03,
    2.93426662e+03, 3.58305802e+03, 4.34379670e+03,
    5.22642526e+03,
];

pub static HOT_TEMPERATURE: [f64; NUM_REFERENCE_DEPTHS] = [
    6.07574017e+03, 6.07574017e+03, 6.13264672e+03,
    6.20030363e+03, 6.27534706e+03, 6.35396255e+03,
    6.43299900e+03, 6.51018809e+03, 6.58411556e+03,
    6.65406718e+03, 6.71983498e+03, 6.78154368e+03,
    6.83954193e+03, 6.89437232e+03, 6.94676889e+03,
    6.99759489e+03, 7.04769490e+03, 7.09773520e+03,
    7.14812062e+03, 7.19901427e+03, 7.25041827e+03,
    7.30225172e+03, 7.35440094e+03, 7.40675066e+03,
    7.45920456e+03, 7.51166464e+03, 7.56404229e+03,
    7.61627006e+03, 7.66833575e+03, 7.72034173e+03,
    7.77258786e+03, 7.82555139e+03, 7.87986936e+03,
    7.93639247e+03, 7.99620846e+03, 8.06052820e+03,
    8.13047124e+03, 8.20741189e+03, 8.29307358e+03,
    8.38980788e+03, 8.49906054e+03, 8.62314484e+03,
    8.76456384e+03, 8.92693371e+03, 9.11177170e+03,
    9.32167977e+03, 9.56236982e+03, 9.82432657e+03,
    1.01311428e+04, 1.04299661e+04, 1.08355089e+04,
    1.12094887e+04, 1.16360710e+04, 1.20991238e+04,
    1.25891111e+04, 1.31070008e+04, 1.36522499e+04,
    1.42233474e+04, 1.48188302e+04, 1.54423659e+04,
    1.60892587e+04, 1.67828518e+04, 1.74930217e+04,
    1.82922662e+04,
];

pub static HOT_GAS_PRESSURE: [f64; NUM_REFERENCE_DEPTHS] = [
    1.00000000e-04, 8.32127743e-02, 1.29584527e-01,
    1.94435381e-01, 2.81524760e-01, 3.94850766e-01,
    5.39098198e-01, 7.20109114e-01, 9.45331395e-01,
    1.22424261e+00, 1.56877813e+00, 1.99379948e+00,
    2.51761638e+00, 3.16251088e+00, 3.95513967e+00,
    4.92671520e+00, 6.11303768e+00, 7.55464146e+00,
    9.29736005e+00, 1.13934670e+01, 1.39033472e+01,
    1.68975909e+01, 2.04594802e+01, 2.46878881e+01,
    2.97005965e+01, 3.56383534e+01, 4.26698208e+01,
    5.09974403e+01, 6.08640463e+01, 7.25594340e+01,
    8.64248329e+01, 1.02854593e+02, 1.22294652e+02,
    1.45234045e+02, 1.72184927e+02, 2.03652335e+02,
    2.40105656e+02, 2.81936164e+02, 3.29393095e+02,
    3.82482413e+02, 4.40963325e+02, 5.04333230e+02,
    5.71827998e+02, 6.42424030e+02, 7.15115448e+02,
    7.89188191e+02, 8.64179478e+02, 9.41037809e+02,
    1.02093026e+03, 1.10808817e+03, 1.20591339e+03,
    1.32157322e+03, 1.46400967e+03, 1.64395528e+03,
    1.87431045e+03, 2.16986660e+03, 2.54753164e+03,
    3.02667797e+03, 3.62964225e+03, 4.38288420e+03,
    5.31730880e+03, 6.47251190e+03, 7.89413608e+03,
    9.64747840e+03,
];

pub static HOT_ELECTRON_PRESSURE: [f64; NUM_REFERENCE_DEPTHS] = [
    4.77258390e-05, 1.54333795e-02, 2.24384775e-02,
    3.24056218e-02, 4.62639510e-02, 6.49897301e-02,
    8.96001972e-02, 1.21161157e-01, 1.60825358e-01,
    2.09891147e-01, 2.69867426e-01, 3.42538888e-01,
    4.30045384e-01, 5.35006987e-01, 6.60704783e-01,
    8.11262306e-01, 9.91741961e-01, 1.20813527e+00,
    1.46731522e+00, 1.77705126e+00, 2.14614122e+00,
    2.58462667e+00, 3.10405211e+00, 3.71777653e+00,
    4.44135289e+00, 5.29279500e+00, 6.29303772e+00,
    7.46652990e+00, 8.84221515e+00, 1.04552217e+01,
    1.23496849e+01, 1.45813048e+01, 1.72206437e+01,
    2.03589457e+01, 2.41156209e+01, 2.86442876e+01,
    3.41355927e+01, 4.08398462e+01, 4.90908766e+01,
    5.93486059e+01, 7.21405305e+01, 8.81824952e+01,
    1.08367130e+02, 1.33856172e+02, 1.65693081e+02,
    2.04943253e+02, 2.52705001e+02, 3.07224624e+02,
    3.70334137e+02, 4.33722318e+02, 5.08910396e+02,
    5.82220694e+02, 6.65278728e+02, 7.62124992e+02,
    8.79654482e+02, 1.02622263e+03, 1.21099204e+03,
    1.44432886e+03, 1.73838904e+03, 2.10808802e+03,
    2.57102380e+03, 3.14976026e+03, 3.86645771e+03,
    4.75493679e+03,
];
